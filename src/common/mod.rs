pub mod route_filter;
