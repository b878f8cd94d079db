use cosmwasm_std::{Addr, Deps, MessageInfo, Uint128, Uint256};

use crate::error::ContractError;
use crate::state::CONFIG;

pub fn assert_owner(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if *sender != config.owner {
        return Err(ContractError::Unauthorized {
            role: "owner".to_string(),
        });
    }
    Ok(())
}

pub fn reject_funds(info: &MessageInfo) -> Result<(), ContractError> {
    if !info.funds.is_empty() {
        return Err(ContractError::UnexpectedFunds);
    }
    Ok(())
}

/// Fee gate: the attached funds must cover `required` in `denom`.
/// Checked before any state is touched.
pub fn assert_mint_fee(
    info: &MessageInfo,
    denom: &str,
    required: Uint128,
) -> Result<(), ContractError> {
    let sent = info
        .funds
        .iter()
        .filter(|coin| coin.denom == denom)
        .map(|coin| coin.amount)
        .sum::<Uint128>();
    if sent < required {
        return Err(ContractError::NotEnoughFee {
            required: required.to_string(),
            sent: sent.to_string(),
        });
    }
    Ok(())
}

/// Validate the cumulative chance table once, at instantiation:
/// non-empty, strictly increasing from a positive first bound, one tier URI
/// per entry.
pub fn validate_chance_table(table: &[u32], uri_count: usize) -> Result<(), ContractError> {
    if table.is_empty() {
        return Err(ContractError::InvalidChanceTable {
            reason: "table is empty".to_string(),
        });
    }
    if table[0] == 0 {
        return Err(ContractError::InvalidChanceTable {
            reason: "first bound must be positive".to_string(),
        });
    }
    if table.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(ContractError::InvalidChanceTable {
            reason: "bounds must be strictly increasing".to_string(),
        });
    }
    if table.len() != uri_count {
        return Err(ContractError::InvalidChanceTable {
            reason: format!(
                "{} tiers but {} tier uris",
                table.len(),
                uri_count
            ),
        });
    }
    Ok(())
}

/// Reduce a raw random word modulo the table's modulus. The result always
/// fits well under u32: the modulus is the last chance-table entry.
pub fn reduce_raw_word(word: Uint256, modulus: u32) -> u32 {
    let reduced = word % Uint256::from(u128::from(modulus));
    let bytes = reduced.to_be_bytes();
    u32::from_be_bytes([bytes[28], bytes[29], bytes[30], bytes[31]])
}

/// Map a reduced raw value to its tier: the index of the first bound
/// strictly greater than the value. A value equal to a bound belongs to the
/// next tier. `raw_value` must already be reduced modulo the last bound.
pub fn derive_tier(raw_value: u32, table: &[u32]) -> u8 {
    table
        .iter()
        .position(|bound| raw_value < *bound)
        .unwrap_or(table.len() - 1) as u8
}
