use std::sync::Arc;

use async_trait::async_trait;
use ethereum_types::{Address, H256};
use ethers::abi::{decode, ParamType, Token};
use ethers::types::U256;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use reciclo_chain::contract::SUBMIT_SIGNATURE;
use reciclo_chain::lifecycle::{ContractLifecycleManager, LifecyclePhase, LifecycleState};
use reciclo_chain::network::NetworkGuard;
use reciclo_chain::store::SubmissionStore;
use reciclo_core::error::{Error, WalletError, WalletResult, UNRECOGNIZED_CHAIN_CODE};
use reciclo_core::traits::WalletProvider;
use reciclo_core::types::{
    ChainParams, CitizenType, DeployedContract, LocationType, SubmissionDraft,
};
use reciclo_core::utils::function_selector;

const SEPOLIA_ID: u64 = 11155111;

#[derive(Default)]
struct FakeCalls {
    switches: Vec<u64>,
    added: Vec<String>,
    deploys: usize,
    sent: Vec<(Address, Vec<u8>)>,
}

/// Provedor de carteira roteirizado para os testes
struct FakeWallet {
    chain: Mutex<u64>,
    switch_error: Mutex<Option<WalletError>>,
    submit_error: Option<WalletError>,
    cancel_after_deploy: Option<CancellationToken>,
    calls: Mutex<FakeCalls>,
}

impl FakeWallet {
    fn on_chain(chain: u64) -> Self {
        Self {
            chain: Mutex::new(chain),
            switch_error: Mutex::new(None),
            submit_error: None,
            cancel_after_deploy: None,
            calls: Mutex::new(FakeCalls::default()),
        }
    }

    /// A primeira troca de rede falha com o erro dado; as seguintes passam
    fn failing_first_switch(self, error: WalletError) -> Self {
        *self.switch_error.lock() = Some(error);
        self
    }

    fn failing_submission(mut self, error: WalletError) -> Self {
        self.submit_error = Some(error);
        self
    }

    fn cancelling_after_deploy(mut self, token: CancellationToken) -> Self {
        self.cancel_after_deploy = Some(token);
        self
    }
}

#[async_trait]
impl WalletProvider for FakeWallet {
    async fn request_accounts(&self) -> WalletResult<Vec<Address>> {
        Ok(vec![Address::repeat_byte(0xaa)])
    }

    async fn chain_id(&self) -> WalletResult<u64> {
        Ok(*self.chain.lock())
    }

    async fn switch_chain(&self, chain_id: u64) -> WalletResult<()> {
        self.calls.lock().switches.push(chain_id);
        if let Some(err) = self.switch_error.lock().take() {
            return Err(err);
        }
        *self.chain.lock() = chain_id;
        Ok(())
    }

    async fn add_chain(&self, chain: &ChainParams) -> WalletResult<()> {
        self.calls.lock().added.push(chain.name.clone());
        Ok(())
    }

    async fn deploy_contract(&self, _bytecode: Vec<u8>) -> WalletResult<DeployedContract> {
        self.calls.lock().deploys += 1;
        if let Some(token) = &self.cancel_after_deploy {
            token.cancel();
        }
        Ok(DeployedContract {
            address: Address::repeat_byte(0x42),
            transaction_hash: H256::repeat_byte(0x01),
        })
    }

    async fn send_transaction(&self, to: Address, calldata: Vec<u8>) -> WalletResult<H256> {
        if let Some(err) = &self.submit_error {
            return Err(err.clone());
        }
        self.calls.lock().sent.push((to, calldata));
        Ok(H256::repeat_byte(0x02))
    }
}

fn draft() -> SubmissionDraft {
    SubmissionDraft {
        trash_type: "recyclable".to_string(),
        weight_kg: Some(3.2),
        location_type: LocationType::Urban,
        citizen_type: CitizenType::Taxpayer,
        area_dirtiness_level: 72.0,
        reward_amount: 19.0,
    }
}

fn store(name: &str) -> Arc<SubmissionStore> {
    let dir = std::env::temp_dir().join(format!(
        "reciclo-lifecycle-{}-{}",
        std::process::id(),
        name
    ));
    Arc::new(SubmissionStore::open(dir).expect("abre o store"))
}

fn manager(wallet: Arc<FakeWallet>, name: &str) -> ContractLifecycleManager {
    ContractLifecycleManager::new(wallet, ChainParams::sepolia(), store(name))
}

#[tokio::test]
async fn network_guard_skips_switch_when_already_on_required_chain() {
    let wallet = FakeWallet::on_chain(SEPOLIA_ID);
    let guard = NetworkGuard::new(ChainParams::sepolia());

    guard.ensure_network(&wallet).await.expect("rede já correta");
    assert!(wallet.calls.lock().switches.is_empty());
}

#[tokio::test]
async fn network_guard_switches_on_mismatch() {
    let wallet = FakeWallet::on_chain(1);
    let guard = NetworkGuard::new(ChainParams::sepolia());

    guard.ensure_network(&wallet).await.expect("troca aceita");

    let calls = wallet.calls.lock();
    assert_eq!(calls.switches, vec![SEPOLIA_ID]);
    assert!(calls.added.is_empty());
}

#[tokio::test]
async fn network_guard_registers_unknown_chain_and_retries_the_switch() {
    let wallet = FakeWallet::on_chain(1).failing_first_switch(WalletError::new(
        Some(UNRECOGNIZED_CHAIN_CODE),
        "Unrecognized chain ID",
    ));
    let guard = NetworkGuard::new(ChainParams::sepolia());

    guard.ensure_network(&wallet).await.expect("registra e repete");

    let calls = wallet.calls.lock();
    assert_eq!(calls.switches, vec![SEPOLIA_ID, SEPOLIA_ID]);
    assert_eq!(calls.added, vec!["Sepolia".to_string()]);
}

#[tokio::test]
async fn network_guard_surfaces_other_rejections_with_remediation() {
    let wallet = FakeWallet::on_chain(1)
        .failing_first_switch(WalletError::new(Some(4001), "User rejected the request"));
    let guard = NetworkGuard::new(ChainParams::sepolia());

    let err = guard.ensure_network(&wallet).await.unwrap_err();
    match err {
        Error::NetworkMismatch(message) => {
            assert!(message.contains("Troque a rede na carteira"));
            assert!(message.contains("User rejected"));
        }
        other => panic!("esperava NetworkMismatch, veio {:?}", other),
    }
    assert!(wallet.calls.lock().added.is_empty());
}

#[tokio::test]
async fn run_submits_with_the_fixed_field_order() {
    let wallet = Arc::new(FakeWallet::on_chain(SEPOLIA_ID));
    let manager = manager(wallet.clone(), "field-order");

    let instance = manager
        .run(&draft(), &CancellationToken::new())
        .await
        .expect("fluxo completo");

    assert_eq!(instance.address, Address::repeat_byte(0x42));
    assert_eq!(instance.submission_tx, H256::repeat_byte(0x02));
    assert!(matches!(manager.state(), LifecycleState::Success { .. }));

    let calls = wallet.calls.lock();
    assert_eq!(calls.deploys, 1);
    let (to, calldata) = &calls.sent[0];
    assert_eq!(*to, Address::repeat_byte(0x42));
    assert_eq!(&calldata[..4], &function_selector(SUBMIT_SIGNATURE));

    let tokens = decode(
        &[
            ParamType::String,
            ParamType::Uint(256),
            ParamType::String,
            ParamType::String,
            ParamType::Uint(256),
            ParamType::Uint(256),
        ],
        &calldata[4..],
    )
    .expect("calldata decodificável");
    assert_eq!(
        tokens,
        vec![
            Token::String("recyclable".to_string()),
            Token::Uint(U256::from(3u64)),
            Token::String("urban".to_string()),
            Token::String("taxpayer".to_string()),
            Token::Uint(U256::from(4u64)),
            Token::Uint(U256::from(19u64)),
        ]
    );
}

#[tokio::test]
async fn run_records_the_last_contract_on_success() {
    let wallet = Arc::new(FakeWallet::on_chain(SEPOLIA_ID));
    let storage = store("record-last");
    let manager =
        ContractLifecycleManager::new(wallet, ChainParams::sepolia(), storage.clone());

    manager
        .run(&draft(), &CancellationToken::new())
        .await
        .expect("fluxo completo");

    assert_eq!(storage.last_known(), Some(Address::repeat_byte(0x42)));
}

#[tokio::test]
async fn run_keeps_the_deployed_address_on_submission_failure() {
    let wallet = Arc::new(
        FakeWallet::on_chain(SEPOLIA_ID)
            .failing_submission(WalletError::rejection("execution reverted")),
    );
    let manager = manager(wallet.clone(), "partial-failure");

    let err = manager
        .run(&draft(), &CancellationToken::new())
        .await
        .unwrap_err();

    match &err {
        Error::Submission(message) => {
            assert!(message.contains("execution reverted"));
            assert!(message.contains("ajustado"));
            assert!(message.contains("1..5"));
        }
        other => panic!("esperava Submission, veio {:?}", other),
    }

    // o contrato implantado permanece consultável, não é descartado
    match manager.state() {
        LifecycleState::Error {
            phase,
            deployed,
            message,
        } => {
            assert_eq!(phase, LifecyclePhase::Submit);
            assert_eq!(deployed, Some(Address::repeat_byte(0x42)));
            assert!(!message.is_empty());
        }
        other => panic!("esperava Error, veio {:?}", other),
    }
}

#[tokio::test]
async fn deploy_failure_requires_rerunning_the_whole_sequence() {
    struct RejectingWallet;

    #[async_trait]
    impl WalletProvider for RejectingWallet {
        async fn request_accounts(&self) -> WalletResult<Vec<Address>> {
            Err(WalletError::new(Some(4001), "User rejected the request"))
        }
        async fn chain_id(&self) -> WalletResult<u64> {
            Ok(SEPOLIA_ID)
        }
        async fn switch_chain(&self, _chain_id: u64) -> WalletResult<()> {
            Ok(())
        }
        async fn add_chain(&self, _chain: &ChainParams) -> WalletResult<()> {
            Ok(())
        }
        async fn deploy_contract(&self, _bytecode: Vec<u8>) -> WalletResult<DeployedContract> {
            unreachable!("não deve chegar ao deploy sem contas")
        }
        async fn send_transaction(&self, _to: Address, _calldata: Vec<u8>) -> WalletResult<H256> {
            unreachable!("não deve submeter sem deploy")
        }
    }

    let manager = ContractLifecycleManager::new(
        Arc::new(RejectingWallet),
        ChainParams::sepolia(),
        store("deploy-failure"),
    );

    let err = manager
        .run(&draft(), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Deployment(_)));
    assert!(matches!(
        manager.state(),
        LifecycleState::Error {
            phase: LifecyclePhase::Deploy,
            deployed: None,
            ..
        }
    ));
}

#[tokio::test]
async fn cancellation_before_deploy_starts_nothing() {
    let wallet = Arc::new(FakeWallet::on_chain(SEPOLIA_ID));
    let manager = manager(wallet.clone(), "cancel-early");

    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = manager.run(&draft(), &cancel).await.unwrap_err();
    assert!(matches!(err, Error::Cancelled(_)));
    assert_eq!(wallet.calls.lock().deploys, 0);
}

#[tokio::test]
async fn cancellation_after_deploy_stops_the_submission_only() {
    let cancel = CancellationToken::new();
    let wallet = Arc::new(
        FakeWallet::on_chain(SEPOLIA_ID).cancelling_after_deploy(cancel.clone()),
    );
    let manager = manager(wallet.clone(), "cancel-mid");

    let err = manager.run(&draft(), &cancel).await.unwrap_err();
    assert!(matches!(err, Error::Cancelled(_)));

    // o deploy confirmado não é desfeito; a submissão nunca começa
    let calls = wallet.calls.lock();
    assert_eq!(calls.deploys, 1);
    assert!(calls.sent.is_empty());
    assert!(matches!(
        manager.state(),
        LifecycleState::Error {
            phase: LifecyclePhase::Submit,
            deployed: Some(_),
            ..
        }
    ));
}

#[tokio::test]
async fn progress_is_observable_through_the_state_channel() {
    let wallet = Arc::new(FakeWallet::on_chain(SEPOLIA_ID));
    let manager = manager(wallet, "progress");
    let receiver = manager.subscribe();

    assert_eq!(*receiver.borrow(), LifecycleState::Idle);
    manager
        .run(&draft(), &CancellationToken::new())
        .await
        .expect("fluxo completo");
    assert!(matches!(*receiver.borrow(), LifecycleState::Success { .. }));
}
