/*!
 * Reciclo Core
 *
 * Tipos, erros e traits compartilhados para a workspace Reciclo
 */

pub mod error;
pub mod traits;
pub mod types;
pub mod utils;

pub use error::{Error, Result, WalletError, WalletResult};
pub use traits::WalletProvider;
