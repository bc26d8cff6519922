//! Cliente HTTP dos endpoints de classificação e pontos de referência.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use tracing::{info, warn};

use reciclo_core::error::{Error, Result};
use reciclo_core::types::{CitizenType, ClassificationResult, Coordinates, ReferencePoint};

/// Configuração do cliente de classificação
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Cliente dos endpoints consumidos pelo fluxo de submissão
pub struct ClassifierClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ClassifierClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Api(format!("falha ao criar o cliente HTTP: {}", e)))?;
        Ok(Self { http, config })
    }

    /// Envia a imagem como multipart {file, citizen_type, lat, lng} e
    /// interpreta o resultado de classificação. A resposta é tratada como
    /// não confiável: campos ausentes assumem os defaults defensivos.
    pub async fn predict(
        &self,
        image: Vec<u8>,
        file_name: &str,
        citizen_type: CitizenType,
        location: Coordinates,
    ) -> Result<ClassificationResult> {
        let part = Part::bytes(image).file_name(file_name.to_string());
        let form = Form::new()
            .part("file", part)
            .text("citizen_type", citizen_type.to_string())
            .text("lat", location.lat.to_string())
            .text("lng", location.lng.to_string());

        let url = format!("{}/predict", self.config.base_url);
        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Api(format!("falha ao chamar {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::Api(format!(
                "o serviço de classificação respondeu {}",
                response.status()
            )));
        }

        response
            .json::<ClassificationResult>()
            .await
            .map_err(|e| Error::Api(format!("resposta de classificação inválida: {}", e)))
    }

    /// Busca os pontos de referência de sujeira, uma vez por sessão.
    /// Falha não é fatal: o conjunto vazio apenas desabilita as
    /// comparações "e se".
    pub async fn reference_points(&self) -> Vec<ReferencePoint> {
        let url = format!("{}/api/dirtiness-points", self.config.base_url);
        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("falha ao buscar pontos de referência: {}", e);
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            warn!("pontos de referência indisponíveis: {}", response.status());
            return Vec::new();
        }

        match response.json::<Vec<ReferencePoint>>().await {
            Ok(points) => {
                info!("{} pontos de referência carregados", points.len());
                points
            }
            Err(e) => {
                warn!("pontos de referência ilegíveis: {}", e);
                Vec::new()
            }
        }
    }
}
