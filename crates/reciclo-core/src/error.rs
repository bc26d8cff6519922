use std::fmt;
use thiserror::Error;

/// Erros comuns da workspace Reciclo
#[derive(Error, Debug)]
pub enum Error {
    /// Entrada do usuário ausente ou inválida, detectada antes de qualquer
    /// chamada de rede
    #[error("Entrada inválida: {0}")]
    InputError(String),

    /// Carteira conectada à rede errada e a troca/registro falhou
    #[error("Rede incorreta: {0}")]
    NetworkMismatch(String),

    /// Falha no deploy do contrato
    #[error("Falha no deploy do contrato: {0}")]
    Deployment(String),

    /// Falha na submissão do registro ao contrato
    #[error("Falha na submissão: {0}")]
    Submission(String),

    /// Nenhum provedor de carteira detectado
    #[error("Carteira indisponível: {0}")]
    ProviderUnavailable(String),

    /// Erro de comunicação com o serviço de classificação
    #[error("Erro de API: {0}")]
    Api(String),

    /// Erro de armazenamento local
    #[error("Erro de armazenamento: {0}")]
    Storage(String),

    /// Fluxo abandonado pelo usuário antes de concluir
    #[error("Fluxo cancelado: {0}")]
    Cancelled(String),
}

/// Tipo de resultado usado em toda a workspace
pub type Result<T> = std::result::Result<T, Error>;

/// Código EIP-1193 retornado quando a rede pedida não está registrada na
/// carteira
pub const UNRECOGNIZED_CHAIN_CODE: i64 = 4902;

/// Rejeição retornada pelo provedor de carteira. Preserva o código numérico
/// do protocolo para que o chamador possa distinguir rede desconhecida
/// (4902) de uma recusa do usuário.
#[derive(Debug, Clone)]
pub struct WalletError {
    pub code: Option<i64>,
    pub message: String,
}

impl WalletError {
    pub fn new(code: Option<i64>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Rejeição sem código de protocolo
    pub fn rejection(message: impl Into<String>) -> Self {
        Self::new(None, message)
    }

    /// Verifica se a rejeição indica rede não registrada na carteira
    pub fn unrecognized_chain(&self) -> bool {
        self.code == Some(UNRECOGNIZED_CHAIN_CODE)
    }
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{} (código {})", self.message, code),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for WalletError {}

/// Resultado das operações da carteira
pub type WalletResult<T> = std::result::Result<T, WalletError>;
