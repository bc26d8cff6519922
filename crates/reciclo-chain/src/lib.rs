/*!
 * Reciclo Chain
 *
 * Commit em duas fases contra o ledger EVM: deploy de um contrato dedicado
 * por submissão, seguido do envio do registro normalizado. Cada submissão
 * recebe uma instância nova de contrato — isolamento total dos dados em
 * troca do custo de gás.
 */

pub mod contract;
pub mod lifecycle;
pub mod network;
pub mod providers;
pub mod store;

pub use lifecycle::{ContractLifecycleManager, LifecyclePhase, LifecycleState};
pub use network::NetworkGuard;
pub use providers::{RpcWalletConfig, RpcWalletProvider};
pub use store::SubmissionStore;
