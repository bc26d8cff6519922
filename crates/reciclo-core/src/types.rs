/*!
 * Reciclo Types
 *
 * Tipos comuns usados em toda a workspace Reciclo
 */

use ethereum_types::{Address, H256};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Categoria de resíduo reconhecida pelo classificador
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrashCategory {
    Recyclable,
    NonRecyclable,
    Other,
}

impl TrashCategory {
    /// Interpreta o rótulo livre emitido pelo classificador. O prefixo
    /// "recycl" cobre variantes como "Recyclable" e "recycling"; rótulos
    /// nessa família contam como categoria já ótima no cálculo de
    /// recompensa potencial, mesmo sem igualdade exata com "recyclable".
    pub fn from_label(label: &str) -> Self {
        let lower = label.trim().to_lowercase();
        if lower.starts_with("recycl") {
            TrashCategory::Recyclable
        } else if lower.is_empty() || lower == "other" || lower == "unknown" {
            TrashCategory::Other
        } else {
            TrashCategory::NonRecyclable
        }
    }
}

impl fmt::Display for TrashCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrashCategory::Recyclable => write!(f, "recyclable"),
            TrashCategory::NonRecyclable => write!(f, "non-recyclable"),
            TrashCategory::Other => write!(f, "other"),
        }
    }
}

/// Tipo de cidadão que envia o resíduo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitizenType {
    Ration,
    Taxpayer,
    Regular,
}

impl fmt::Display for CitizenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CitizenType::Ration => write!(f, "ration"),
            CitizenType::Taxpayer => write!(f, "taxpayer"),
            CitizenType::Regular => write!(f, "regular"),
        }
    }
}

/// Tipo de localização do descarte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    Urban,
    Rural,
    Other,
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationType::Urban => write!(f, "urban"),
            LocationType::Rural => write!(f, "rural"),
            LocationType::Other => write!(f, "other"),
        }
    }
}

/// Natureza da recompensa concedida ao cidadão
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardKind {
    TaxCredit,
    RationSubsidy,
}

impl RewardKind {
    /// Interpreta o rótulo de recompensa retornado pelo classificador
    pub fn from_label(label: &str) -> Self {
        if label.contains("Tax Credit") {
            RewardKind::TaxCredit
        } else {
            RewardKind::RationSubsidy
        }
    }
}

impl fmt::Display for RewardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewardKind::TaxCredit => write!(f, "Tax Credit"),
            RewardKind::RationSubsidy => write!(f, "Ration Subsidy"),
        }
    }
}

/// Detecção individual retornada pelo classificador
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub confidence: f64,
    /// Caixa delimitadora [x1, y1, x2, y2]
    #[serde(rename = "box", default)]
    pub bounding_box: [f64; 4],
}

/// Resultado de classificação retornado pelo endpoint de predição.
/// Entrada não confiável: todos os campos numéricos têm default defensivo
/// e coordenadas aceitam número ou string. Imutável após o recebimento.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(default = "default_trash_type")]
    pub trash_type: String,
    /// Rótulo de recompensa já formatado, ex. "₹10.00 Ration Subsidy"
    #[serde(default)]
    pub reward: String,
    #[serde(default)]
    pub cleanliness_score: f64,
    #[serde(default)]
    pub base_reward: f64,
    #[serde(default)]
    pub cleanliness_bonus: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lat: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lng: f64,
    #[serde(default)]
    pub detections: Vec<Detection>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
}

impl ClassificationResult {
    /// Categoria enumerada derivada do rótulo livre
    pub fn category(&self) -> TrashCategory {
        TrashCategory::from_label(&self.trash_type)
    }
}

fn default_trash_type() -> String {
    "other".to_string()
}

fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(f64),
        Str(String),
    }

    Ok(match Option::<NumOrStr>::deserialize(deserializer)? {
        Some(NumOrStr::Num(v)) => v,
        Some(NumOrStr::Str(s)) => s.trim().parse().unwrap_or(0.0),
        None => 0.0,
    })
}

/// Ponto de referência com índice histórico de sujeira. Somente leitura,
/// usado apenas para comparações "e se"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferencePoint {
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lng: f64,
    /// Índice de sujeira em [0,1]
    #[serde(default)]
    pub score: f64,
    #[serde(default = "default_point_name")]
    pub name: String,
}

fn default_point_name() -> String {
    "Unknown".to_string()
}

/// Submissão bruta montada a partir de um resultado de classificação na
/// confirmação do usuário, antes da normalização
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionDraft {
    pub trash_type: String,
    pub weight_kg: Option<f64>,
    pub location_type: LocationType,
    pub citizen_type: CitizenType,
    pub area_dirtiness_level: f64,
    pub reward_amount: f64,
}

/// Registro normalizado que cruza a fronteira de confiança para o ledger.
/// Construído exclusivamente pelo normalizador; os invariantes
/// (sujeira em 1..=5, recompensa e peso ≥ 1) valem por construção.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub trash_type: String,
    pub weight_kg: u64,
    pub location_type: LocationType,
    pub citizen_type: CitizenType,
    pub area_dirtiness_level: u8,
    pub reward_amount: u64,
}

/// Contrato recém-implantado, antes da submissão
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployedContract {
    pub address: Address,
    pub transaction_hash: H256,
}

/// Instância completa de contrato dedicada a uma única submissão
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractInstance {
    pub address: Address,
    pub deployment_tx: H256,
    pub submission_tx: H256,
}

/// Parâmetros da rede exigida pelo ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainParams {
    pub chain_id: u64,
    pub name: String,
    pub currency_symbol: String,
    pub rpc_url: String,
    pub explorer_url: String,
}

impl ChainParams {
    /// Rede de teste designada
    pub fn sepolia() -> Self {
        Self {
            chain_id: 11155111,
            name: "Sepolia".to_string(),
            currency_symbol: "ETH".to_string(),
            rpc_url: "https://rpc.sepolia.org".to_string(),
            explorer_url: "https://sepolia.etherscan.io".to_string(),
        }
    }

    /// Identificador da rede no formato hexadecimal das carteiras
    pub fn chain_id_hex(&self) -> String {
        format!("0x{:x}", self.chain_id)
    }
}

/// Coordenadas geográficas do descarte
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}
