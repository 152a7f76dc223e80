pub mod a002_geo_boundary;
