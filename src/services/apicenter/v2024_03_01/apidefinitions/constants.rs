use crate::enums::open_enum;

open_enum! {
    pub enum ApiSpecExportResultFormat {
        Inline => "inline",
        Link => "link",
    }
}

open_enum! {
    pub enum ApiSpecImportSourceFormat {
        Inline => "inline",
        Link => "link",
    }
}
