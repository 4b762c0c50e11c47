use crate::error::ImportError;
use crate::flows::{CreateFetchFlow, CreatePatchFlow, UploadFlow};

pub struct FlowFactory;

impl FlowFactory {
    /// Create an upload flow instance from its configured name
    pub fn create(flow_name: &str) -> Result<Box<dyn UploadFlow>, ImportError> {
        match flow_name {
            "create_fetch" => Ok(Box::new(CreateFetchFlow)),
            "create_patch" => Ok(Box::new(CreatePatchFlow)),
            _ => Err(ImportError::UnknownFlow(flow_name.to_string())),
        }
    }

    /// List all available flow names
    pub fn available_flows() -> Vec<&'static str> {
        vec!["create_fetch", "create_patch"]
    }
}
