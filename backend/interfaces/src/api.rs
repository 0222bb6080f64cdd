pub trait ConnectorCommon {
    /// Name of the connector (in lowercase).
    fn id(&self) -> &'static str;

    /// Signature version this connector signs and verifies with.
    fn signature_version(&self) -> &'static str;
}
