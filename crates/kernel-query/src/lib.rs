pub mod deadline;
pub mod mesh;
pub mod mock_kernel;
pub mod primitives;
pub mod tessellation;
pub mod traits;
pub mod types;

pub use deadline::{Deadline, DeadlineExceeded};
pub use mesh::TriMesh;
pub use mock_kernel::{MockSolid, MockSolidBuilder};
pub use traits::*;
pub use types::*;
