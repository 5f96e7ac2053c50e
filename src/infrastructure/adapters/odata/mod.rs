//! OData Adapter - OData v4 词典服务客户端

mod odata_client;

pub use odata_client::{render_filter, ODataClientConfig, ODataDictionaryClient};
