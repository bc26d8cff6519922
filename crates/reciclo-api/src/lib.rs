/*!
 * Reciclo API
 *
 * Clientes dos serviços externos de classificação e o fluxo sequenciado
 * de submissão (localização → predição → deploy → submissão).
 */

pub mod client;
pub mod flow;

pub use client::{ApiConfig, ClassifierClient};
pub use flow::{FixedLocation, LocationSource, SubmissionFlow, WastePhoto};
