/// ETF 資金流與列表處理器
pub mod etf;
/// 市場報價處理器
pub mod market;
/// 系統處理器
pub mod system;
