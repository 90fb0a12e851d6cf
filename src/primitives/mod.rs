mod bigint;
mod boolean;
mod enumeration;
mod literal;
mod misc;
mod number;
mod string;

pub use bigint::ZBigInt;
pub use boolean::ZBool;
pub use enumeration::ZEnum;
pub use literal::ZLiteral;
pub use misc::{ZAny, ZNever, ZNil, ZUnknown};
pub use number::{ZFloat, ZInt};
pub use string::ZString;
