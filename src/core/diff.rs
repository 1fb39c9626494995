use crate::domain::value::{Fields, Value};

static ABSENT: Value = Value::Absent;

/// 計算從 `before` 到 `after` 的變動
///
/// 先依 `before` 的順序走訪，再走訪只有 `after` 才有的鍵。任一邊缺值，或兩值不
/// [`identical`](Value::identical) 時回報該鍵。兩邊都是物件時回報巢狀差異，
/// 否則直接回報 `after` 的值。
pub fn diff(before: &Fields, after: &Fields) -> Fields {
    let mut result = Fields::new();

    let added = after.keys().filter(|key| !before.contains_key(key));
    for key in before.keys().chain(added) {
        let old = before.get(key).unwrap_or(&ABSENT);
        let new = after.get(key).unwrap_or(&ABSENT);

        if new.is_absent() || old.is_absent() || !old.identical(new) {
            let value = match (old, new) {
                (Value::Object(old), Value::Object(new)) => Value::object(diff(old, new)),
                _ => new.clone(),
            };
            result.insert(key.clone(), value);
        }
    }

    result
}
