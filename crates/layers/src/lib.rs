pub mod extrusion;
pub mod fog;
pub mod layer;
pub mod symbology;

pub use extrusion::*;
pub use fog::*;
pub use layer::*;
pub use symbology::*;
