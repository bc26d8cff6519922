//! Referência persistida do último contrato submetido com sucesso.

use std::fs;
use std::path::{Path, PathBuf};

use ethereum_types::Address;
use parking_lot::RwLock;
use tracing::warn;

use reciclo_core::error::{Error, Result};
use reciclo_core::utils::{format_address, hex_to_address};

/// Chave fixa sob a qual o último endereço é persistido
pub const LAST_CONTRACT_KEY: &str = "last_contract_address";

/// Slot único com sobrescrita: sem expiração, sem histórico. Inicializado
/// do armazenamento durável na abertura, atualizado apenas em submissões
/// bem-sucedidas, nunca apagado.
pub struct SubmissionStore {
    path: PathBuf,
    last: RwLock<Option<Address>>,
}

impl SubmissionStore {
    /// Abre o store no diretório indicado, lendo o valor persistido por
    /// sessões anteriores. Conteúdo corrompido é tratado como ausente.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| {
            Error::Storage(format!("falha ao criar o diretório {}: {}", dir.display(), e))
        })?;
        let path = dir.join(LAST_CONTRACT_KEY);

        let last = match fs::read_to_string(&path) {
            Ok(raw) => {
                let parsed = hex_to_address(raw.trim());
                if parsed.is_none() && !raw.trim().is_empty() {
                    warn!("endereço persistido inválido em {}; ignorando", path.display());
                }
                parsed
            }
            Err(_) => None,
        };

        Ok(Self {
            path,
            last: RwLock::new(last),
        })
    }

    /// Sobrescreve o último endereço conhecido. Idempotente: gravar o
    /// mesmo endereço duas vezes não duplica nem falha.
    pub fn record_last(&self, address: Address) -> Result<()> {
        fs::write(&self.path, format_address(&address)).map_err(|e| {
            Error::Storage(format!("falha ao gravar {}: {}", self.path.display(), e))
        })?;
        *self.last.write() = Some(address);
        Ok(())
    }

    /// Último endereço submetido com sucesso, se houver
    pub fn last_known(&self) -> Option<Address> {
        *self.last.read()
    }
}
