pub mod d400_yearly_revenue;
pub mod d401_country_sales;
pub mod d402_revenue_calendar;
pub mod d403_logistics_flow;
