//! Fluxo de submissão sequenciado de ponta a ponta.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::info;

use reciclo_chain::lifecycle::ContractLifecycleManager;
use reciclo_core::error::{Error, Result};
use reciclo_core::types::{
    CitizenType, ClassificationResult, ContractInstance, Coordinates, LocationType,
    ReferencePoint, SubmissionDraft,
};
use reciclo_reward::model::compute_current;

use crate::client::ClassifierClient;

/// Fonte de localização do dispositivo. Ponto de suspensão independente:
/// a aquisição termina antes de o pedido de predição ser montado, sem
/// paralelismo com as chamadas de rede.
#[async_trait]
pub trait LocationSource: Send + Sync {
    async fn current(&self) -> Result<Coordinates>;
}

/// Localização fixa, para ambientes sem geolocalização e para testes
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl LocationSource for FixedLocation {
    async fn current(&self) -> Result<Coordinates> {
        Ok(self.0)
    }
}

/// Imagem enviada pelo cidadão
#[derive(Debug, Clone)]
pub struct WastePhoto {
    pub bytes: Vec<u8>,
    pub file_name: String,
}

/// Sequencia o fluxo completo de forma determinística: localização →
/// predição → deploy → submissão. O abandono é um sinal explícito
/// observado entre as fases, nunca um callback pendente ignorado.
pub struct SubmissionFlow<L: LocationSource> {
    client: ClassifierClient,
    locator: L,
    manager: ContractLifecycleManager,
}

impl<L: LocationSource> SubmissionFlow<L> {
    pub fn new(client: ClassifierClient, locator: L, manager: ContractLifecycleManager) -> Self {
        Self {
            client,
            locator,
            manager,
        }
    }

    /// Valida a entrada localmente, adquire a localização e classifica a
    /// imagem. Entrada ausente é recuperada localmente, sem nenhuma
    /// chamada de rede. Devolve também os pontos de referência (conjunto
    /// vazio quando o serviço falha).
    pub async fn classify(
        &self,
        photo: &WastePhoto,
        citizen_type: CitizenType,
    ) -> Result<(ClassificationResult, Vec<ReferencePoint>)> {
        if photo.bytes.is_empty() {
            return Err(Error::InputError(
                "envie uma imagem antes de classificar".to_string(),
            ));
        }

        let location = self.locator.current().await.map_err(|e| {
            Error::InputError(format!("não foi possível obter a localização: {}", e))
        })?;

        let result = self
            .client
            .predict(photo.bytes.clone(), &photo.file_name, citizen_type, location)
            .await?;
        let points = self.client.reference_points().await;
        Ok((result, points))
    }

    /// Monta o rascunho de submissão a partir do resultado confirmado pelo
    /// usuário: sujeira na escala 0–100 e recompensa igual ao total atual
    pub fn draft(
        &self,
        result: &ClassificationResult,
        citizen_type: CitizenType,
        location_type: LocationType,
    ) -> SubmissionDraft {
        let current = compute_current(result);
        SubmissionDraft {
            trash_type: result.trash_type.clone(),
            weight_kg: result.weight_kg,
            location_type,
            citizen_type,
            area_dirtiness_level: result.cleanliness_score * 100.0,
            reward_amount: current.total,
        }
    }

    /// Registra a submissão confirmada no ledger via commit em duas fases
    pub async fn submit(
        &self,
        draft: &SubmissionDraft,
        cancel: &CancellationToken,
    ) -> Result<ContractInstance> {
        info!("iniciando o commit em duas fases");
        self.manager.run(draft, cancel).await
    }

    /// Acesso ao gerenciador, para observação de progresso
    pub fn manager(&self) -> &ContractLifecycleManager {
        &self.manager
    }
}
