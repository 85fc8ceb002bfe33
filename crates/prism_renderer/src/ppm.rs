//! Plain-text PPM (`P3`) output.

use crate::{color_to_rgb, ImageBuffer, RenderResult};
use std::io::Write;

/// Write an image as plain PPM.
///
/// Header `P3`, then `<width> <height>`, then `255`, followed by one
/// `r g b` line per pixel. Rows go top to bottom, pixels left to right.
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: &mut W) -> RenderResult<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for y in 0..image.height {
        for x in 0..image.width {
            let [r, g, b] = color_to_rgb(image.get(x, y));
            writeln!(writer, "{} {} {}", r, g, b)?;
        }
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{render, Camera, CameraSettings, Color, Lambertian, RenderConfig, RenderError, Scene, Vec3};
    use std::io;

    #[test]
    fn test_ppm_layout() {
        let mut image = ImageBuffer::new(2, 2);
        image.set(1, 0, Color::ONE);
        image.set(0, 1, Color::new(0.25, 0.0, 0.0));

        let mut out = Vec::new();
        write_ppm(&image, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "P3\n2 2\n255\n0 0 0\n255 255 255\n128 0 0\n0 0 0\n");
    }

    #[test]
    fn test_ground_render_to_ppm() {
        // Looking straight down at a huge ground sphere: no ray sees the sky
        let mut scene = Scene::new();
        let ground = scene.add_material(Lambertian::new(Color::new(0.5, 0.5, 0.5)));
        scene.add_sphere(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground);

        let camera = Camera::new(
            &CameraSettings::default()
                .with_position(Vec3::new(0.0, 1.0, 0.0), Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0))
                .with_aspect_ratio(1.0),
        );
        let config = RenderConfig {
            image_width: 2,
            image_height: 2,
            samples_per_pixel: 1,
            max_depth: 10,
            seed: 0,
        };

        let image = render(&camera, &scene, &config).unwrap();
        let mut out = Vec::new();
        write_ppm(&image, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("P3\n2 2\n255\n"));
        let triples: Vec<&str> = text.lines().skip(3).collect();
        assert_eq!(triples.len(), 4);
        for line in triples {
            let channels: Vec<u32> = line.split(' ').map(|c| c.parse().unwrap()).collect();
            assert_eq!(channels.len(), 3);
            assert!(channels.iter().all(|&c| c <= 255));
        }
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_error_is_reported() {
        let image = ImageBuffer::new(1, 1);
        let err = write_ppm(&image, &mut FailingWriter).unwrap_err();
        assert!(matches!(err, RenderError::Io(e) if e.kind() == io::ErrorKind::BrokenPipe));
    }
}
