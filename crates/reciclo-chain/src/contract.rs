//! Interface do contrato de registro por submissão: bytecode fixo de
//! deploy e montagem do calldata de `submitGarbage`.

use ethers::abi::{encode, Token};
use ethers::types::U256;
use once_cell::sync::Lazy;

use reciclo_core::error::{Error, Result};
use reciclo_core::types::SubmissionRecord;
use reciclo_core::utils::function_selector;

/// Assinatura canônica do ponto de entrada do ledger
pub const SUBMIT_SIGNATURE: &str =
    "submitGarbage(string,uint256,string,string,uint256,uint256)";

/// Bytecode fixo do contrato implantado a cada submissão
pub const CONTRACT_BYTECODE: &str = "0x608060405234801561001057600080fd5b50610150806100206000396000f3fe608060405234801561001057600080fd5b50600436106100365760003560e01c8063a0e47bf61461003b578063f8b2cb4f1461005a575b600080fd5b61004361007a565b6040516100519291906100a8565b60405180910390f35b610063610089565b6040516100719291906100d7565b60405180910390f35b60008060009054906101000a900460ff16905090565b60008060009054906101000a900460ff16905090565b6000819050919050565b6100a28161008f565b82525050565b60006020820190506100bd6000830184610099565b92915050565b6100cc8161008f565b82525050565b60006020820190506100e760008301846100c3565b9291505056fea2646970667358221220a0e47bf61461003b578063f8b2cb4f1461005a575b600080fd5b61004361007a565b6040516100519291906100a8565b60405180910390f35b610063610089565b6040516100719291906100d7565b60405180910390f35b60008060009054906101000a900460ff16905090565b60008060009054906101000a900460ff16905090565b6000819050919050565b6100a28161008f565b82525050565b60006020820190506100bd6000830184610099565b92915050565b6100cc8161008f565b82525050565b60006020820190506100e760008301846100c3565b9291505056fea2646970667358221220";

static SUBMIT_SELECTOR: Lazy<[u8; 4]> = Lazy::new(|| function_selector(SUBMIT_SIGNATURE));

/// Bytecode decodificado, pronto para o deploy
pub fn deployment_bytecode() -> Result<Vec<u8>> {
    hex::decode(CONTRACT_BYTECODE.trim_start_matches("0x"))
        .map_err(|e| Error::Deployment(format!("bytecode do contrato inválido: {}", e)))
}

/// Monta o calldata de `submitGarbage` na ordem fixa de campos exigida
/// pelo contrato: trashType, weightKg, locationType, citizenType,
/// areaDirtinessLevel, rewardAmount
pub fn submit_calldata(record: &SubmissionRecord) -> Vec<u8> {
    let tokens = [
        Token::String(record.trash_type.clone()),
        Token::Uint(U256::from(record.weight_kg)),
        Token::String(record.location_type.to_string()),
        Token::String(record.citizen_type.to_string()),
        Token::Uint(U256::from(record.area_dirtiness_level)),
        Token::Uint(U256::from(record.reward_amount)),
    ];

    let mut data = SUBMIT_SELECTOR.to_vec();
    data.extend(encode(&tokens));
    data
}
