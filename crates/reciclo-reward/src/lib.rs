/*!
 * Reciclo Reward
 *
 * Modelo de recompensa e normalização de valores para o ledger.
 * Funções puras, sem I/O.
 */

pub mod model;
pub mod normalize;

pub use model::{compute_current, compute_potential, PotentialReward, RewardBreakdown};
pub use normalize::{
    normalize_dirtiness, normalize_reward, normalize_submission, normalize_weight,
};
