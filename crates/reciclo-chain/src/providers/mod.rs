//! Implementações do provedor de carteira

mod rpc;

pub use rpc::{RpcWalletConfig, RpcWalletProvider};
