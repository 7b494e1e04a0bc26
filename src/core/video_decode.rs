use std::path::{Path, PathBuf};

use ffmpeg_next as ffmpeg;
use image::RgbaImage;
use tracing::{debug, info};

use super::video_source::{VideoBackend, VideoSource};
use crate::constants::DEFAULT_FPS;
use crate::error::{AnnotatorError, Result};

const AV_TIME_BASE: i64 = 1_000_000;

/// Opens videos through FFmpeg's demuxers and decoders.
#[derive(Debug, Clone, Copy)]
pub struct FfmpegBackend;

impl FfmpegBackend {
    pub fn new() -> Result<Self> {
        ffmpeg::init().map_err(|err| AnnotatorError::VideoOpen {
            path: PathBuf::new(),
            reason: format!("FFmpeg initialisation failed: {}", err),
        })?;
        Ok(Self)
    }
}

impl VideoBackend for FfmpegBackend {
    fn open(&self, path: &Path) -> Result<Box<dyn VideoSource>> {
        let source = FfmpegVideoSource::open(path).map_err(|err| AnnotatorError::VideoOpen {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        info!(
            path = %path.display(),
            frames = source.frame_count,
            fps = ?source.frame_rate,
            "video opened"
        );
        Ok(Box::new(source))
    }
}

/// One open video stream, decoding to RGBA at its native size.
struct FfmpegVideoSource {
    input: ffmpeg::format::context::Input,
    stream_index: usize,
    decoder: ffmpeg::decoder::Video,
    scaler: ffmpeg::software::scaling::Context,
    time_base: ffmpeg::Rational,
    frame_rate: Option<f64>,
    frame_count: u64,
    width: u32,
    height: u32,
    /// Frames decoded before this timestamp are discarded after a seek.
    target_pts: Option<i64>,
    at_eof: bool,
}

impl FfmpegVideoSource {
    fn open(path: &Path) -> std::result::Result<Self, ffmpeg::Error> {
        let input = ffmpeg::format::input(path)?;
        let stream = input
            .streams()
            .best(ffmpeg::media::Type::Video)
            .ok_or(ffmpeg::Error::StreamNotFound)?;
        let stream_index = stream.index();
        let time_base = stream.time_base();
        let frame_rate = rational_to_f64(stream.avg_frame_rate())
            .or_else(|| rational_to_f64(stream.rate()));

        let frame_count = if stream.frames() > 0 {
            stream.frames() as u64
        } else {
            let seconds = input.duration().max(0) as f64 / AV_TIME_BASE as f64;
            (seconds * frame_rate.unwrap_or(DEFAULT_FPS as f64)).floor() as u64
        };

        let context = ffmpeg::codec::context::Context::from_parameters(stream.parameters())?;
        let decoder = context.decoder().video()?;

        let width = decoder.width().max(1);
        let height = decoder.height().max(1);

        // The single color-space conversion: decoder pixel format to RGBA.
        let scaler = ffmpeg::software::scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg::util::format::Pixel::RGBA,
            width,
            height,
            ffmpeg::software::scaling::Flags::BILINEAR,
        )?;

        Ok(Self {
            input,
            stream_index,
            decoder,
            scaler,
            time_base,
            frame_rate,
            frame_count,
            width,
            height,
            target_pts: None,
            at_eof: false,
        })
    }

    fn seconds_for_index(&self, index: u64) -> f64 {
        index as f64 / self.frame_rate.unwrap_or(DEFAULT_FPS as f64)
    }

    fn convert(&mut self, decoded: &ffmpeg::util::frame::Video) -> Option<RgbaImage> {
        let mut rgba_frame = ffmpeg::util::frame::Video::empty();
        self.scaler.run(decoded, &mut rgba_frame).ok()?;
        frame_to_rgba(&rgba_frame)
    }

    fn accepts(&self, decoded: &ffmpeg::util::frame::Video) -> bool {
        match (self.target_pts, decoded.timestamp().or(decoded.pts())) {
            (Some(target), Some(frame_pts)) => frame_pts >= target,
            _ => true,
        }
    }
}

impl VideoSource for FfmpegVideoSource {
    fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn frame_rate(&self) -> Option<f64> {
        self.frame_rate
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn seek(&mut self, index: u64) -> Result<()> {
        let seconds = self.seconds_for_index(index);
        let target_ts = (seconds * AV_TIME_BASE as f64).round() as i64;
        self.input
            .seek(target_ts, ..target_ts)
            .map_err(|err| AnnotatorError::Decode {
                index,
                reason: err.to_string(),
            })?;
        self.decoder.flush();
        self.target_pts = Some(seconds_to_pts(seconds, self.time_base));
        self.at_eof = false;
        Ok(())
    }

    fn read_frame(&mut self) -> Result<Option<RgbaImage>> {
        let mut decoded = ffmpeg::util::frame::Video::empty();

        if !self.at_eof {
            loop {
                let (index, packet) = match self.input.packets().next() {
                    Some((stream, packet)) => (stream.index(), packet),
                    None => break,
                };
                if index != self.stream_index {
                    continue;
                }
                if self.decoder.send_packet(&packet).is_err() {
                    continue;
                }
                while self.decoder.receive_frame(&mut decoded).is_ok() {
                    if !self.accepts(&decoded) {
                        continue;
                    }
                    if let Some(image) = self.convert(&decoded) {
                        self.target_pts = None;
                        return Ok(Some(image));
                    }
                }
            }
            self.at_eof = true;
            let _ = self.decoder.send_eof();
        }

        // Drain frames still buffered in the decoder.
        while self.decoder.receive_frame(&mut decoded).is_ok() {
            if !self.accepts(&decoded) {
                continue;
            }
            if let Some(image) = self.convert(&decoded) {
                self.target_pts = None;
                return Ok(Some(image));
            }
        }

        debug!("end of stream");
        Ok(None)
    }
}

fn rational_to_f64(rate: ffmpeg::Rational) -> Option<f64> {
    let numerator = rate.numerator() as f64;
    let denominator = rate.denominator() as f64;
    if numerator <= 0.0 || denominator <= 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

fn seconds_to_pts(time_seconds: f64, time_base: ffmpeg::Rational) -> i64 {
    let numerator = time_base.numerator() as f64;
    let denominator = time_base.denominator() as f64;
    if numerator <= 0.0 || denominator <= 0.0 {
        return 0;
    }

    (time_seconds * denominator / numerator).round() as i64
}

fn frame_to_rgba(frame: &ffmpeg::util::frame::Video) -> Option<RgbaImage> {
    let width = frame.width() as usize;
    let height = frame.height() as usize;
    if width == 0 || height == 0 {
        return None;
    }

    let stride = frame.stride(0);
    let row_bytes = width * 4;
    if stride < row_bytes {
        return None;
    }

    let data = frame.data(0);
    let mut buffer = vec![0_u8; row_bytes * height];

    for y in 0..height {
        let src_offset = y * stride;
        let dst_offset = y * row_bytes;
        let src_slice = data.get(src_offset..src_offset + row_bytes)?;
        buffer[dst_offset..dst_offset + row_bytes].copy_from_slice(src_slice);
    }

    RgbaImage::from_vec(width as u32, height as u32, buffer)
}
