use anchor_lang::prelude::*;

// Adapter account layouts (external programs' state):
//   [0..8]  reserved / discriminator
//   [8]     status flag (healthy / active)
//   [9..25] u128 LE value (scaled by REWARD_PRECISION)
const ADAPTER_DATA_LEN: usize = 25;
const FLAG_OFFSET: usize = 8;
const VALUE_OFFSET: usize = 9;

/// Parse an adapter account defensively. Unreadable data, a short buffer,
/// an unset status flag, or a zero value all collapse to "no value";
/// adapter failure is never surfaced as an error of the resolver.
fn read_adapter(info: &AccountInfo) -> Option<u128> {
    let data = info.try_borrow_data().ok()?;
    if data.len() < ADAPTER_DATA_LEN {
        return None;
    }
    if data[FLAG_OFFSET] == 0 {
        return None;
    }
    let value = u128::from_le_bytes(data[VALUE_OFFSET..ADAPTER_DATA_LEN].try_into().ok()?);
    (value > 0).then_some(value)
}

/// Primary oracle: healthy flag + usd value per staked unit.
pub fn read_primary(info: &AccountInfo) -> Option<u128> {
    read_adapter(info)
}

/// Secondary oracle: active flag + price.
pub fn read_secondary(info: &AccountInfo) -> Option<u128> {
    read_adapter(info)
}
