use crate::enums::open_enum;

open_enum! {
    pub enum LockLevel {
        CanNotDelete => "CanNotDelete",
        NotSpecified => "NotSpecified",
        ReadOnly => "ReadOnly",
    }
}
