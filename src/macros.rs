/// Declarative object-shape sugar.
///
/// ```
/// use zodic::prelude::*;
///
/// let user = zodic::zobject! {
///     "name" => zodic::string().min(2),
///     "age" => zodic::int().min(0).optional(),
/// };
/// assert!(user.parse_value(Value::from(serde_json::json!({"name": "Alex"}))).is_ok());
/// ```
#[macro_export]
macro_rules! zobject {
    () => {
        $crate::object()
    };
    ( $( $key:literal => $schema:expr ),+ $(,)? ) => {
        $crate::object()$(.field($key, $schema))+
    };
}
