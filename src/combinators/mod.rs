mod custom;
mod describe;
mod discriminated_union;
mod intersection;
mod lazy_schema;
mod pipe;
mod refine;
mod transform;
mod union;

pub use custom::{ZCheckSchema, ZCustom};
pub use describe::ZDescribe;
pub use discriminated_union::ZDiscriminatedUnion;
pub use intersection::ZIntersection;
pub use lazy_schema::{ZLazy, MAX_RECURSION_DEPTH};
pub use pipe::ZPipe;
pub use refine::{RefineParams, ZRefine};
pub use transform::{TransformCtx, ZTransform};
pub use union::ZUnion;
