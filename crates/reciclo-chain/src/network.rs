//! Validação da rede ativa da carteira antes de cada fase on-chain.

use tracing::{debug, info, warn};

use reciclo_core::error::{Error, Result, WalletError};
use reciclo_core::traits::WalletProvider;
use reciclo_core::types::ChainParams;

/// Garante que a carteira está na rede exigida. O estado da rede nunca é
/// cacheado entre chamadas: o usuário pode trocar de carteira ou de rede
/// entre o deploy e a submissão.
pub struct NetworkGuard {
    required: ChainParams,
}

impl NetworkGuard {
    pub fn new(required: ChainParams) -> Self {
        Self { required }
    }

    /// Rede exigida pelo ledger
    pub fn required(&self) -> &ChainParams {
        &self.required
    }

    /// Consulta a rede ativa e, se divergente, pede a troca. Redes ainda
    /// desconhecidas pela carteira (código 4902) são registradas com o RPC
    /// e o explorador canônicos, e a troca é repetida.
    pub async fn ensure_network(&self, provider: &dyn WalletProvider) -> Result<()> {
        let current = provider.chain_id().await.map_err(|e| {
            Error::NetworkMismatch(format!("falha ao consultar a rede ativa: {}", e))
        })?;

        if current == self.required.chain_id {
            debug!("carteira já está na rede exigida ({})", self.required.name);
            return Ok(());
        }

        info!(
            "rede ativa {} difere da exigida {}; solicitando troca",
            current, self.required.chain_id
        );
        match provider.switch_chain(self.required.chain_id).await {
            Ok(()) => Ok(()),
            Err(err) if err.unrecognized_chain() => {
                warn!(
                    "rede {} desconhecida pela carteira; registrando e repetindo a troca",
                    self.required.name
                );
                provider
                    .add_chain(&self.required)
                    .await
                    .map_err(|e| self.mismatch(e))?;
                provider
                    .switch_chain(self.required.chain_id)
                    .await
                    .map_err(|e| self.mismatch(e))?;
                Ok(())
            }
            Err(err) => Err(self.mismatch(err)),
        }
    }

    fn mismatch(&self, err: WalletError) -> Error {
        Error::NetworkMismatch(format!(
            "não foi possível conectar à rede {}: {}. Troque a rede na carteira e tente novamente",
            self.required.name, err
        ))
    }
}
