/// 股價紀錄
pub mod price_record;
