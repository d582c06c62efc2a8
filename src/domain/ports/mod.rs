mod backend_port;
mod resource_port;
mod sink_port;

pub use backend_port::BackendPort;
pub use resource_port::ResourceBundlePort;
pub use sink_port::ResponseSinkPort;

#[cfg(test)]
pub mod mocks {
    pub use super::backend_port::mock::ScriptedBackend;
    pub use super::resource_port::MockResourceBundlePort;
    pub use super::sink_port::mock::RecordingSink;
}
