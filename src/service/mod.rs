/// 股票最新價格查詢
pub mod stock_price;
