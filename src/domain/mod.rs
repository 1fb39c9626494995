// 領域層：屬性值與 schema 能力，不做任何 I/O

pub mod ports;
pub mod value;
