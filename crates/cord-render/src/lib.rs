pub mod hit;
pub mod paint;

pub use hit::{hit_test, hit_test_handle};
pub use paint::{SvgCord, cord_bez_path, svg_path_data};
