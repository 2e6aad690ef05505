use crate::enums::open_enum;

open_enum! {
    pub enum AccessTier {
        Cool => "Cool",
        Hot => "Hot",
        Premium => "Premium",
    }
}

open_enum! {
    pub enum AccountStatus {
        Available => "available",
        Unavailable => "unavailable",
    }
}

open_enum! {
    pub enum DefaultAction {
        Allow => "Allow",
        Deny => "Deny",
    }
}

open_enum! {
    pub enum Kind {
        BlobStorage => "BlobStorage",
        BlockBlobStorage => "BlockBlobStorage",
        FileStorage => "FileStorage",
        Storage => "Storage",
        StorageVTwo => "StorageV2",
    }
}

open_enum! {
    pub enum MinimumTlsVersion {
        TlsOneZero => "TLS1_0",
        TlsOneOne => "TLS1_1",
        TlsOneTwo => "TLS1_2",
    }
}

open_enum! {
    pub enum ProvisioningState {
        Creating => "Creating",
        ResolvingDns => "ResolvingDNS",
        Succeeded => "Succeeded",
    }
}

open_enum! {
    pub enum PublicNetworkAccess {
        Disabled => "Disabled",
        Enabled => "Enabled",
    }
}

open_enum! {
    pub enum Reason {
        AccountNameInvalid => "AccountNameInvalid",
        AlreadyExists => "AlreadyExists",
    }
}

open_enum! {
    pub enum SkuName {
        PremiumLrs => "Premium_LRS",
        PremiumZrs => "Premium_ZRS",
        StandardGrs => "Standard_GRS",
        StandardGzrs => "Standard_GZRS",
        StandardLrs => "Standard_LRS",
        StandardRagrs => "Standard_RAGRS",
        StandardRagzrs => "Standard_RAGZRS",
        StandardZrs => "Standard_ZRS",
    }
}

open_enum! {
    pub enum SkuTier {
        Premium => "Premium",
        Standard => "Standard",
    }
}

open_enum! {
    pub enum StorageAccountExpand {
        BlobRestoreStatus => "blobRestoreStatus",
        GeoReplicationStats => "geoReplicationStats",
    }
}

open_enum! {
    pub enum Type {
        MicrosoftStorageStorageAccounts => "Microsoft.Storage/storageAccounts",
    }
}
