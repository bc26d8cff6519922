//! Orquestração do commit em duas fases: deploy de um contrato novo e
//! submissão do registro normalizado.

use std::sync::Arc;

use ethereum_types::{Address, H256};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use reciclo_core::error::{Error, Result};
use reciclo_core::traits::WalletProvider;
use reciclo_core::types::{ChainParams, ContractInstance, DeployedContract, SubmissionDraft};
use reciclo_core::utils::{format_address, format_h256};
use reciclo_reward::normalize::normalize_submission;

use crate::contract;
use crate::network::NetworkGuard;
use crate::store::SubmissionStore;

/// Fase em que uma falha ocorreu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Deploy,
    Submit,
}

/// Estado observável do commit em duas fases. Nenhuma transição retorna
/// automaticamente a um passo anterior: uma falha exige reexecutar a
/// sequência inteira com um contrato novo, nunca reaproveitar uma
/// instância possivelmente meio-configurada.
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleState {
    Idle,
    Deploying,
    Submitting {
        contract: Address,
    },
    Success {
        contract: Address,
        transaction: H256,
    },
    /// Um contrato implantado sem submissão é um estado parcial legítimo e
    /// inspecionável; o endereço fica consultável aqui
    Error {
        phase: LifecyclePhase,
        deployed: Option<Address>,
        message: String,
    },
}

/// Orquestra o deploy e a submissão sobre o provedor de carteira injetado.
/// Não guarda estado de interface; o progresso é observável pelo canal de
/// estado.
pub struct ContractLifecycleManager {
    provider: Arc<dyn WalletProvider>,
    guard: NetworkGuard,
    store: Arc<SubmissionStore>,
    state: watch::Sender<LifecycleState>,
}

impl ContractLifecycleManager {
    pub fn new(
        provider: Arc<dyn WalletProvider>,
        chain: ChainParams,
        store: Arc<SubmissionStore>,
    ) -> Self {
        let (state, _) = watch::channel(LifecycleState::Idle);
        Self {
            provider,
            guard: NetworkGuard::new(chain),
            store,
            state,
        }
    }

    /// Observa as transições de fase (para interfaces de progresso)
    pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
        self.state.subscribe()
    }

    /// Estado corrente do ciclo de vida
    pub fn state(&self) -> LifecycleState {
        self.state.borrow().clone()
    }

    fn transition(&self, next: LifecycleState) {
        self.state.send_replace(next);
    }

    /// Fase 1: solicita acesso às contas, valida a rede e implanta um
    /// contrato novo a partir do bytecode fixo, aguardando a confirmação
    pub async fn deploy(&self) -> Result<DeployedContract> {
        let accounts = self
            .provider
            .request_accounts()
            .await
            .map_err(|e| Error::Deployment(format!("acesso às contas negado: {}", e)))?;
        if accounts.is_empty() {
            return Err(Error::Deployment(
                "a carteira não devolveu nenhuma conta".to_string(),
            ));
        }

        self.guard.ensure_network(self.provider.as_ref()).await?;

        let bytecode = contract::deployment_bytecode()?;
        info!("implantando contrato novo para a submissão");
        let deployed = self
            .provider
            .deploy_contract(bytecode)
            .await
            .map_err(|e| Error::Deployment(e.to_string()))?;
        info!("contrato implantado em {}", format_address(&deployed.address));
        Ok(deployed)
    }

    /// Fase 2: revalida a rede (o estado pode ter mudado desde o deploy),
    /// normaliza o registro e o envia ao contrato indicado
    pub async fn submit(&self, draft: &SubmissionDraft, address: Address) -> Result<H256> {
        self.guard.ensure_network(self.provider.as_ref()).await?;

        let record = normalize_submission(draft);
        let calldata = contract::submit_calldata(&record);

        let transaction = self
            .provider
            .send_transaction(address, calldata)
            .await
            .map_err(|e| {
                Error::Submission(format!(
                    "a transação falhou: {}. O nível de sujeira foi ajustado \
                     automaticamente para o intervalo 1..5 (enviado: {}), portanto o \
                     valor gravado pode diferir do exibido; confira a rede e tente \
                     novamente",
                    e, record.area_dirtiness_level
                ))
            })?;
        info!("submissão confirmada na transação {}", format_h256(&transaction));
        Ok(transaction)
    }

    /// Sequencia deploy e submissão. Sucesso atualiza a referência
    /// persistida e transiciona para `Success`; falha transiciona para
    /// `Error` mantendo consultável o endereço já implantado.
    pub async fn run(
        &self,
        draft: &SubmissionDraft,
        cancel: &CancellationToken,
    ) -> Result<ContractInstance> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled(
                "fluxo abandonado antes do deploy".to_string(),
            ));
        }

        self.transition(LifecycleState::Deploying);
        let deployed = match self.deploy().await {
            Ok(deployed) => deployed,
            Err(err) => {
                self.transition(LifecycleState::Error {
                    phase: LifecyclePhase::Deploy,
                    deployed: None,
                    message: err.to_string(),
                });
                return Err(err);
            }
        };

        // Transações confirmadas não são revogáveis: o cancelamento não
        // desfaz o deploy, apenas impede o início da fase seguinte.
        if cancel.is_cancelled() {
            let err = Error::Cancelled(format!(
                "fluxo abandonado após o deploy; o contrato {} permanece sem submissão",
                format_address(&deployed.address)
            ));
            self.transition(LifecycleState::Error {
                phase: LifecyclePhase::Submit,
                deployed: Some(deployed.address),
                message: err.to_string(),
            });
            return Err(err);
        }

        self.transition(LifecycleState::Submitting {
            contract: deployed.address,
        });
        match self.submit(draft, deployed.address).await {
            Ok(transaction) => {
                if let Err(err) = self.store.record_last(deployed.address) {
                    // a cadeia é a fonte de verdade; a submissão confirmada
                    // não é anulada por falha do armazenamento local
                    warn!("falha ao persistir o endereço do contrato: {}", err);
                }
                self.transition(LifecycleState::Success {
                    contract: deployed.address,
                    transaction,
                });
                Ok(ContractInstance {
                    address: deployed.address,
                    deployment_tx: deployed.transaction_hash,
                    submission_tx: transaction,
                })
            }
            Err(err) => {
                self.transition(LifecycleState::Error {
                    phase: LifecyclePhase::Submit,
                    deployed: Some(deployed.address),
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }
}
