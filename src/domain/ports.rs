/// 具體模型種類必須提供的能力：允許的屬性集合
///
/// ```
/// use pojo_model::Schema;
///
/// struct Fruit;
///
/// impl Schema for Fruit {
///     fn property_names(&self) -> Vec<&str> {
///         vec!["name", "colour"]
///     }
/// }
///
/// assert_eq!(Fruit.name(), "Fruit");
/// ```
pub trait Schema {
    /// 有序的屬性白名單，同時也是模型的形狀
    fn property_names(&self) -> Vec<&str>;

    /// 錯誤訊息與日誌使用的名稱
    fn name(&self) -> &str {
        let full = std::any::type_name::<Self>();
        let path = full.split('<').next().unwrap_or(full);
        path.rsplit("::").next().unwrap_or(path)
    }
}
