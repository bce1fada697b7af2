// Error codes implementation
// Stable codes shared by every ClinicDesk crate. Never renumber a code.

pub mod validation {
    pub const INVALID_INPUT: &str = "VALIDATION_1001";
    pub const MISSING_REQUIRED_FIELD: &str = "VALIDATION_1002";
    pub const INVALID_FORMAT: &str = "VALIDATION_1003";
}

pub mod configuration {
    pub const SOURCE_FAILED: &str = "CONFIG_2001";
    pub const INVALID_VALUE: &str = "CONFIG_2002";
}

pub mod notification {
    pub const INVALID_REQUEST: &str = "NOTIFY_3001";
    pub const DISPATCH_FAILED: &str = "NOTIFY_3002";
}

pub mod lookup {
    pub const UNKNOWN_PATIENT: &str = "LOOKUP_4001";
    pub const UNKNOWN_CATALOG_ITEM: &str = "LOOKUP_4002";
    pub const NOT_FOUND: &str = "LOOKUP_4003";
}

pub mod billing {
    pub const INVALID_QUANTITY: &str = "BILLING_5001";
    pub const INVALID_PRICE: &str = "BILLING_5002";
    pub const INVALID_DISCOUNT: &str = "BILLING_5003";
    pub const INVALID_PAYMENT: &str = "BILLING_5004";
    pub const EMPTY_DRAFT: &str = "BILLING_5005";
}

pub mod scheduling {
    pub const INVALID_TRANSITION: &str = "SCHED_6001";
    pub const INVALID_SCHEDULE: &str = "SCHED_6002";
}
