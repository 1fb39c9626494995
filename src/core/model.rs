use crate::core::diff::diff;
use crate::domain::ports::Schema;
use crate::domain::value::{Fields, Value};
use crate::utils::error::{ModelError, Result};
use serde::{Serialize, Serializer};
use std::fmt;

/// 只保留 [`Schema`] 所宣告屬性的資料模型
///
/// 建構時的狀態會保存為原始快照，之後不再變動；[`changes`](Model::changes)
/// 以此快照為比較基準。
///
/// ```
/// use pojo_model::{Fields, Model, Schema};
///
/// struct Fruit;
///
/// impl Schema for Fruit {
///     fn property_names(&self) -> Vec<&str> {
///         vec!["name"]
///     }
/// }
///
/// let data = Fields::new().with("name", "orange").with("colour", "orange");
/// let mut fruit = Model::new(Fruit, data);
/// assert!(fruit.get("colour").is_none());
///
/// fruit.update(Fields::new().with("name", "banana"));
/// assert_eq!(fruit.to_string(), r#"{"name":"banana"}"#);
/// ```
///
/// 沒有 schema 就無法建立模型：
///
/// ```compile_fail
/// use pojo_model::{Fields, Model};
///
/// let model = Model::new((), Fields::new());
/// ```
#[derive(Debug, Clone)]
pub struct Model<S: Schema> {
    schema: S,
    fields: Fields,
    original: Fields,
}

impl<S: Schema> Model<S> {
    pub fn new(schema: S, data: Fields) -> Self {
        let filtered = filter(&schema, data);
        tracing::debug!(
            model = schema.name(),
            properties = filtered.len(),
            "Model constructed"
        );

        Self {
            original: filtered.clone(),
            fields: filtered,
            schema,
        }
    }

    /// 從未定型的 JSON 建立模型，非物件一律拒絕
    pub fn from_value(schema: S, data: serde_json::Value) -> Result<Self> {
        let context = format!("construction of {}", schema.name());
        let data = Fields::from_object(data, &context)?;
        Ok(Self::new(schema, data))
    }

    pub fn from_json(schema: S, text: &str) -> Result<Self> {
        let data: serde_json::Value = serde_json::from_str(text)?;
        Self::from_value(schema, data)
    }

    /// 過濾 `data` 後合併進目前狀態
    ///
    /// 過濾結果對每個宣告的屬性各有一筆，`data` 缺少的屬性會變成
    /// [`Value::Absent`]。原始快照不受影響。
    pub fn update(&mut self, data: Fields) -> &mut Self {
        let filtered = filter(&self.schema, data);
        tracing::debug!(model = self.schema.name(), "Model updated");

        for (key, value) in filtered {
            self.fields.insert(key, value);
        }
        self
    }

    pub fn update_value(&mut self, data: serde_json::Value) -> Result<&mut Self> {
        let context = format!("update of {}", self.schema.name());
        let data = Fields::from_object(data, &context)?;
        Ok(self.update(data))
    }

    /// 只更新單一已宣告屬性，其他屬性維持不變
    pub fn set(&mut self, property: &str, value: impl Into<Value>) -> Result<&mut Self> {
        match self.fields.get_mut(property) {
            Some(slot) => *slot = value.into(),
            None => {
                return Err(ModelError::UnknownProperty {
                    schema: self.schema.name().to_string(),
                    property: property.to_string(),
                })
            }
        }
        Ok(self)
    }

    /// 未宣告的屬性回傳 `None`，未設定的屬性回傳 `Some(Value::Absent)`
    pub fn get(&self, property: &str) -> Option<&Value> {
        self.fields.get(property)
    }

    pub fn has_property(&self, property: &str) -> bool {
        self.fields.contains_key(property)
    }

    pub fn property_names(&self) -> Vec<&str> {
        self.schema.property_names()
    }

    pub fn schema(&self) -> &S {
        &self.schema
    }

    /// 建構時的原始快照
    pub fn original(&self) -> &Fields {
        &self.original
    }

    pub fn changes(&self) -> Fields {
        let changes = diff(&self.original, &self.fields);
        tracing::debug!(
            model = self.schema.name(),
            changed = changes.len(),
            "Computed changes"
        );
        changes
    }

    /// 是否有實際變動；快照與目前狀態都缺值的屬性不算
    pub fn has_changes(&self) -> bool {
        self.changes().iter().any(|(key, value)| {
            !value.is_absent() || self.original.get(key).is_some_and(|old| !old.is_absent())
        })
    }

    /// 目前狀態的淺層複本
    pub fn to_data(&self) -> Fields {
        self.fields.clone()
    }

    pub fn to_pojo(&self) -> Fields {
        self.to_data()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.fields)?)
    }
}

impl<S: Schema> fmt::Display for Model<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json().map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl<S: Schema> Serialize for Model<S> {
    fn serialize<Se: Serializer>(&self, serializer: Se) -> std::result::Result<Se::Ok, Se::Error> {
        self.fields.serialize(serializer)
    }
}

fn filter<S: Schema>(schema: &S, mut data: Fields) -> Fields {
    let names = schema.property_names();

    let dropped = data
        .keys()
        .filter(|key| !names.contains(&key.as_str()))
        .count();
    if dropped > 0 {
        tracing::debug!(
            model = schema.name(),
            dropped,
            "Dropped undeclared properties"
        );
    }

    // 重複的屬性名稱只保留第一次出現的位置
    let mut filtered = Fields::with_capacity(names.len());
    for name in names {
        if !filtered.contains_key(name) {
            let value = data.remove(name).unwrap_or_default();
            filtered.insert(name, value);
        }
    }
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone)]
    struct Fruit;

    impl Schema for Fruit {
        fn property_names(&self) -> Vec<&str> {
            vec!["name", "colour"]
        }
    }

    #[derive(Debug)]
    struct Labels;

    impl Schema for Labels {
        fn property_names(&self) -> Vec<&str> {
            vec!["name", " ", "", "name"]
        }
    }

    fn fruit(value: serde_json::Value) -> Model<Fruit> {
        Model::from_value(Fruit, value).unwrap()
    }

    #[test]
    fn test_construction_fills_missing_properties_with_absent() {
        let model = fruit(json!({"name": "orange", "price": 2}));

        assert_eq!(model.to_data().len(), 2);
        assert_eq!(model.get("name"), Some(&Value::from("orange")));
        assert!(model.get("colour").unwrap().is_absent());
        assert!(model.get("price").is_none());
    }

    #[test]
    fn test_property_order_follows_schema() {
        let model = fruit(json!({"colour": "red", "name": "apple"}));
        assert_eq!(model.to_json().unwrap(), r#"{"name":"apple","colour":"red"}"#);
    }

    #[test]
    fn test_any_string_is_a_property_name() {
        let model = Model::from_value(
            Labels,
            json!({"name": "orange", " ": "blank", "": "empty", "colour": "red"}),
        )
        .unwrap();

        assert_eq!(model.to_data().keys().collect::<Vec<_>>(), vec!["name", " ", ""]);
        assert_eq!(
            model.to_json().unwrap(),
            r#"{"name":"orange"," ":"blank","":"empty"}"#
        );
    }

    #[test]
    fn test_duplicate_property_names_collapse() {
        let mut model = Model::new(Labels, Fields::new().with("name", "orange"));
        assert_eq!(model.get("name"), Some(&Value::from("orange")));
        assert_eq!(model.to_data().len(), 3);

        model.update(Fields::new().with("name", "banana"));
        assert_eq!(model.get("name"), Some(&Value::from("banana")));
    }

    #[test]
    fn test_non_object_data_is_rejected() {
        let err = Model::from_value(Fruit, json!(["orange"])).unwrap_err();
        match err {
            ModelError::NotAnObject { context, found } => {
                assert_eq!(context, "construction of Fruit");
                assert_eq!(found, "array");
            }
            other => panic!("unexpected error: {other}"),
        }

        let mut model = fruit(json!({"name": "orange"}));
        assert!(model.update_value(json!(42)).is_err());
        assert_eq!(model.get("name"), Some(&Value::from("orange")));
    }

    #[test]
    fn test_update_resets_omitted_properties() {
        let mut model = fruit(json!({"name": "orange", "colour": "orange"}));
        model.update(Fields::new().with("name", "banana"));

        assert!(model.get("colour").unwrap().is_absent());
        assert_eq!(model.to_json().unwrap(), r#"{"name":"banana"}"#);
    }

    #[test]
    fn test_set_single_property() {
        let mut model = fruit(json!({"name": "orange", "colour": "orange"}));
        model.set("colour", "green").unwrap().set("name", "lime").unwrap();

        assert_eq!(model.to_json().unwrap(), r#"{"name":"lime","colour":"green"}"#);
        assert!(matches!(
            model.set("price", 3),
            Err(ModelError::UnknownProperty { .. })
        ));
    }

    #[test]
    fn test_original_snapshot_is_untouched() {
        let mut model = fruit(json!({"name": "orange", "colour": "orange"}));
        model.update(Fields::new().with("name", "banana").with("colour", "yellow"));

        assert_eq!(model.original().get("name"), Some(&Value::from("orange")));
        assert_eq!(model.original().get("colour"), Some(&Value::from("orange")));
    }

    #[test]
    fn test_has_changes() {
        let mut model = fruit(json!({"name": "orange", "colour": "orange"}));
        assert!(!model.has_changes());

        model.set("name", "banana").unwrap();
        assert!(model.has_changes());
    }

    #[test]
    fn test_has_changes_ignores_properties_never_set() {
        let mut model = fruit(json!({"name": "orange"}));

        // 兩邊都缺值的屬性仍會出現在 changes() 中
        assert!(model.changes().get("colour").is_some_and(Value::is_absent));
        assert!(!model.has_changes());
        assert_eq!(serde_json::to_string(&model.changes()).unwrap(), "{}");

        model.update(Fields::new().with("colour", "orange"));
        assert!(model.has_changes());
    }

    #[test]
    fn test_has_changes_when_property_is_cleared() {
        let mut model = fruit(json!({"name": "orange", "colour": "orange"}));
        model.update(Fields::new().with("name", "orange"));

        assert!(model.get("colour").unwrap().is_absent());
        assert!(model.has_changes());
    }

    #[test]
    fn test_serialize_matches_to_json() {
        let model = fruit(json!({"name": "orange"}));
        assert_eq!(serde_json::to_string(&model).unwrap(), model.to_json().unwrap());
        assert_eq!(format!("{}", model), r#"{"name":"orange"}"#);
    }
}
