/*!
 * Reciclo Utils
 *
 * Utilitários comuns usados em toda a workspace Reciclo
 */

use ethereum_types::{Address, H256};
use std::str::FromStr;
use tiny_keccak::{Hasher, Keccak};

/// Converte uma string hexadecimal para Address
pub fn hex_to_address(hex: &str) -> Option<Address> {
    let hex_str = hex.strip_prefix("0x").unwrap_or(hex);
    Address::from_str(hex_str).ok()
}

/// Formata um Address para exibição
pub fn format_address(address: &Address) -> String {
    format!("0x{:x}", address)
}

/// Formata um H256 para exibição
pub fn format_h256(hash: &H256) -> String {
    format!("0x{:x}", hash)
}

/// Calcula o hash Keccak-256 de dados
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut result = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut result);
    result
}

/// Seletor de função ABI (4 primeiros bytes do keccak da assinatura)
pub fn function_selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}
