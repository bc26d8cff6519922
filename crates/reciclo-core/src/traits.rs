/*!
 * Reciclo Traits
 *
 * Capacidades externas injetadas nos orquestradores
 */

use async_trait::async_trait;
use ethereum_types::{Address, H256};

use crate::error::WalletResult;
use crate::types::{ChainParams, DeployedContract};

/// Capacidade de carteira no formato EIP-1193, injetada no NetworkGuard e
/// no ContractLifecycleManager. Nunca obtida de estado global, para que o
/// núcleo seja testável com um provedor falso.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Solicita acesso às contas da carteira
    async fn request_accounts(&self) -> WalletResult<Vec<Address>>;

    /// Consulta o identificador da rede ativa
    async fn chain_id(&self) -> WalletResult<u64>;

    /// Solicita a troca para a rede indicada
    async fn switch_chain(&self, chain_id: u64) -> WalletResult<()>;

    /// Solicita o registro de uma rede ainda desconhecida pela carteira
    async fn add_chain(&self, chain: &ChainParams) -> WalletResult<()>;

    /// Faz o deploy de um contrato e aguarda a confirmação on-chain
    async fn deploy_contract(&self, bytecode: Vec<u8>) -> WalletResult<DeployedContract>;

    /// Envia uma transação para o contrato e aguarda a confirmação.
    /// Recibos com execução revertida são erros.
    async fn send_transaction(&self, to: Address, calldata: Vec<u8>) -> WalletResult<H256>;
}
