use alloy_primitives::{B256, U256};

/// Position of a question inside its neg-risk market: the last byte of its id.
pub fn get_market_index(question_id: B256) -> u8 {
    question_id[31]
}

/// Bitmask with bit `get_market_index(q)` set for every listed question.
pub fn get_index_set(question_ids: &[B256]) -> U256 {
    question_ids.iter().fold(U256::ZERO, |set, q| {
        set | (U256::from(1u8) << usize::from(get_market_index(*q)))
    })
}

/// Neg-risk market a question belongs to: the question id with its index byte cleared.
pub fn neg_risk_market_id(question_id: B256) -> B256 {
    let mut market_id = question_id;
    market_id[31] = 0;
    market_id
}
