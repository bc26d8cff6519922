use std::time::Duration;

use async_trait::async_trait;
use ethereum_types::{Address, H256};
use ethers::providers::{Http, Middleware, Provider, ProviderError, RpcError};
use ethers::types::{TransactionReceipt, TransactionRequest, H160, U64};
use parking_lot::RwLock;
use serde_json::json;
use tracing::debug;

use reciclo_core::error::{Error, Result, WalletError, WalletResult};
use reciclo_core::traits::WalletProvider;
use reciclo_core::types::{ChainParams, DeployedContract};

/// Configuração do provedor de carteira via JSON-RPC
#[derive(Debug, Clone)]
pub struct RpcWalletConfig {
    pub endpoint: String,
    pub polling_interval: Duration,
}

impl Default for RpcWalletConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8545".to_string(),
            polling_interval: Duration::from_millis(500),
        }
    }
}

/// Provedor de carteira sobre um endpoint JSON-RPC controlado pela
/// carteira do usuário. Expõe as primitivas EIP-1193 consumidas pelo
/// NetworkGuard e pelo ContractLifecycleManager.
pub struct RpcWalletProvider {
    provider: Provider<Http>,
    account: RwLock<Option<H160>>,
}

impl RpcWalletProvider {
    /// Detecta o provedor no endpoint configurado com uma sondagem única.
    /// Endpoint inacessível é condição fatal para o fluxo, reportada ao
    /// usuário — nunca um fallback silencioso.
    pub async fn detect(config: RpcWalletConfig) -> Result<Self> {
        let provider = Provider::<Http>::try_from(config.endpoint.as_str())
            .map_err(|e| {
                Error::ProviderUnavailable(format!(
                    "endpoint de carteira inválido {}: {}",
                    config.endpoint, e
                ))
            })?
            .interval(config.polling_interval);

        provider.get_chainid().await.map_err(|e| {
            Error::ProviderUnavailable(format!(
                "nenhuma carteira detectada em {}: {}. Instale ou inicie o provedor e \
                 tente novamente",
                config.endpoint, e
            ))
        })?;

        Ok(Self {
            provider,
            account: RwLock::new(None),
        })
    }

    /// Conta ativa, pedindo acesso à carteira na primeira utilização.
    /// A conta é cacheada por instância; a rede, nunca.
    async fn active_account(&self) -> WalletResult<H160> {
        if let Some(account) = *self.account.read() {
            return Ok(account);
        }
        let accounts = self.request_accounts().await?;
        accounts
            .first()
            .map(|a| H160::from_slice(a.as_bytes()))
            .ok_or_else(|| WalletError::rejection("a carteira não devolveu nenhuma conta"))
    }

    async fn await_receipt(&self, tx: TransactionRequest) -> WalletResult<TransactionReceipt> {
        let pending = self
            .provider
            .send_transaction(tx, None)
            .await
            .map_err(to_wallet_error)?;
        let receipt = pending
            .await
            .map_err(to_wallet_error)?
            .ok_or_else(|| WalletError::rejection("transação sem recibo"))?;
        if receipt.status == Some(U64::zero()) {
            return Err(WalletError::rejection("execução revertida"));
        }
        Ok(receipt)
    }
}

fn to_wallet_error(err: ProviderError) -> WalletError {
    match err.as_error_response() {
        Some(rpc) => WalletError::new(Some(rpc.code), rpc.message.clone()),
        None => WalletError::rejection(err.to_string()),
    }
}

#[async_trait]
impl WalletProvider for RpcWalletProvider {
    async fn request_accounts(&self) -> WalletResult<Vec<Address>> {
        let accounts: Vec<H160> = self
            .provider
            .request("eth_requestAccounts", ())
            .await
            .map_err(to_wallet_error)?;
        if let Some(first) = accounts.first() {
            *self.account.write() = Some(*first);
        }
        Ok(accounts
            .iter()
            .map(|a| Address::from_slice(a.as_bytes()))
            .collect())
    }

    async fn chain_id(&self) -> WalletResult<u64> {
        let id: U64 = self
            .provider
            .request("eth_chainId", ())
            .await
            .map_err(to_wallet_error)?;
        Ok(id.as_u64())
    }

    async fn switch_chain(&self, chain_id: u64) -> WalletResult<()> {
        let params = json!([{ "chainId": format!("0x{:x}", chain_id) }]);
        let _: serde_json::Value = self
            .provider
            .request("wallet_switchEthereumChain", params)
            .await
            .map_err(to_wallet_error)?;
        Ok(())
    }

    async fn add_chain(&self, chain: &ChainParams) -> WalletResult<()> {
        let params = json!([{
            "chainId": chain.chain_id_hex(),
            "chainName": chain.name,
            "nativeCurrency": {
                "name": format!("{} {}", chain.name, chain.currency_symbol),
                "symbol": chain.currency_symbol,
                "decimals": 18,
            },
            "rpcUrls": [chain.rpc_url],
            "blockExplorerUrls": [chain.explorer_url],
        }]);
        let _: serde_json::Value = self
            .provider
            .request("wallet_addEthereumChain", params)
            .await
            .map_err(to_wallet_error)?;
        Ok(())
    }

    async fn deploy_contract(&self, bytecode: Vec<u8>) -> WalletResult<DeployedContract> {
        let from = self.active_account().await?;
        let tx = TransactionRequest::new().from(from).data(bytecode);
        let receipt = self.await_receipt(tx).await?;
        let address = receipt
            .contract_address
            .ok_or_else(|| WalletError::rejection("recibo de deploy sem endereço de contrato"))?;
        debug!("deploy confirmado no bloco {:?}", receipt.block_number);
        Ok(DeployedContract {
            address: Address::from_slice(address.as_bytes()),
            transaction_hash: H256::from_slice(receipt.transaction_hash.as_bytes()),
        })
    }

    async fn send_transaction(&self, to: Address, calldata: Vec<u8>) -> WalletResult<H256> {
        let from = self.active_account().await?;
        let tx = TransactionRequest::new()
            .from(from)
            .to(H160::from_slice(to.as_bytes()))
            .data(calldata);
        let receipt = self.await_receipt(tx).await?;
        Ok(H256::from_slice(receipt.transaction_hash.as_bytes()))
    }
}
