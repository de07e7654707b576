pub mod avg_price;
pub mod exchange_info;
pub mod symbol;
