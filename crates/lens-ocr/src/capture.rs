use lens_core::{CaptureAdapter, CaptureError, Frame};
use lens_types::CaptureRegion;
use xcap::Monitor;
use xcap::image::{DynamicImage, RgbaImage, imageops};

/// Monitor geometry in virtual desktop coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bounds {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
}

impl Bounds {
    fn of(monitor: &Monitor) -> Self {
        Self {
            x: monitor.x(),
            y: monitor.y(),
            width: monitor.width(),
            height: monitor.height(),
        }
    }

    fn contains_point(&self, x: i32, y: i32) -> bool {
        CaptureRegion::new(self.x, self.y, self.width, self.height).contains(x, y)
    }

    fn contains_region(&self, region: &CaptureRegion) -> bool {
        let right = i64::from(region.x) + i64::from(region.width);
        let bottom = i64::from(region.y) + i64::from(region.height);
        region.x >= self.x
            && region.y >= self.y
            && right <= i64::from(self.x) + i64::from(self.width)
            && bottom <= i64::from(self.y) + i64::from(self.height)
    }
}

/// Index of the monitor holding the whole region
fn locate(region: &CaptureRegion, monitors: &[Bounds]) -> Result<usize, CaptureError> {
    if region.is_empty() {
        return Err(CaptureError::InvalidRegion(format!(
            "{}x{} has no area",
            region.width, region.height
        )));
    }

    if let Some(index) = monitors.iter().position(|m| m.contains_region(region)) {
        return Ok(index);
    }

    match monitors
        .iter()
        .find(|m| m.contains_point(region.x, region.y))
    {
        Some(monitor) => Err(CaptureError::InvalidRegion(format!(
            "{:?} extends past monitor at ({}, {}) {}x{}",
            region, monitor.x, monitor.y, monitor.width, monitor.height
        ))),
        None => Err(CaptureError::InvalidRegion(format!(
            "{:?} is outside every monitor",
            region
        ))),
    }
}

/// Crop a monitor image to the region and drop the alpha channel
fn crop_to_frame(
    image: &RgbaImage,
    monitor: Bounds,
    region: &CaptureRegion,
) -> Result<Frame, CaptureError> {
    let left = (region.x - monitor.x) as u32;
    let top = (region.y - monitor.y) as u32;
    // Scaled displays can report logical geometry smaller than the raster
    if left + region.width > image.width() || top + region.height > image.height() {
        return Err(CaptureError::InvalidRegion(format!(
            "{:?} exceeds captured image {}x{}",
            region,
            image.width(),
            image.height()
        )));
    }

    let cropped = imageops::crop_imm(image, left, top, region.width, region.height).to_image();
    let rgb = DynamicImage::ImageRgba8(cropped).into_rgb8();
    Ok(Frame::new(rgb.width(), rgb.height(), rgb.into_raw()))
}

/// Screen capture through xcap; multi-monitor aware
#[derive(Debug, Default, Clone, Copy)]
pub struct ScreenCapture;

impl ScreenCapture {
    pub fn new() -> Self {
        Self
    }
}

impl CaptureAdapter for ScreenCapture {
    fn capture(&self, region: CaptureRegion) -> Result<Frame, CaptureError> {
        let monitors = Monitor::all()
            .map_err(|e| CaptureError::Platform(format!("Failed to get monitors: {}", e)))?;
        let bounds: Vec<Bounds> = monitors.iter().map(Bounds::of).collect();
        let index = locate(&region, &bounds)?;

        let image = monitors[index]
            .capture_image()
            .map_err(|e| CaptureError::Platform(format!("Failed to capture screen: {}", e)))?;

        let frame = crop_to_frame(&image, bounds[index], &region)?;
        tracing::trace!(
            "Captured {}x{} from monitor {}",
            frame.width,
            frame.height,
            index
        );
        Ok(frame)
    }
}
