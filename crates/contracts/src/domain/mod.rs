pub mod a001_sales_record;
pub mod a002_geo_boundary;
