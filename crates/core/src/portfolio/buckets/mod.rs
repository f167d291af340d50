mod bucket_key;

pub use bucket_key::{
    derive_key, derive_key_for_date, week_number, BucketKey, BucketSortKey, Granularity,
};
