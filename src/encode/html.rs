use base64::Engine as _;

/// An encoded MP4 that can be embedded into an HTML page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Html5Video {
    /// MP4 (H.264) file bytes.
    pub mp4: Vec<u8>,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
}

impl Html5Video {
    /// Base64 `data:` URI of the video.
    pub fn data_uri(&self) -> String {
        format!(
            "data:video/mp4;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&self.mp4)
        )
    }

    /// Self-contained `<video>` element that autoplays and loops.
    pub fn to_html(&self) -> String {
        format!(
            "<video width=\"{}\" height=\"{}\" controls autoplay loop>\n  <source type=\"video/mp4\" src=\"{}\">\n  Your browser does not support the video tag.\n</video>",
            self.width,
            self.height,
            self.data_uri()
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/html.rs"]
mod tests;
