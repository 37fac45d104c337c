use super::*;

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps::new(20, 1).unwrap(),
        frame_count: 1,
    }
}

#[test]
fn codec_follows_container_extension() {
    assert_eq!(VideoCodec::for_path(Path::new("out.MP4")), VideoCodec::H264);
    assert_eq!(VideoCodec::for_path(Path::new("a/b.mkv")), VideoCodec::H264);
    assert_eq!(VideoCodec::for_path(Path::new("a.webm")), VideoCodec::Vp9);
    assert_eq!(VideoCodec::for_path(Path::new("a.avi")), VideoCodec::Auto);
    assert_eq!(VideoCodec::for_path(Path::new("noext")), VideoCodec::Auto);
}

#[test]
fn command_line_carries_rate_size_and_codec() {
    let sink = FfmpegSink::new(FfmpegSinkOpts::new("target/x.mp4"));
    let cmd = sink.command(&cfg(936, 504));
    let args: Vec<String> = cmd
        .get_args()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    let pos = |s: &str| args.iter().position(|a| a == s).unwrap();
    assert_eq!(args[pos("-s") + 1], "936x504");
    assert_eq!(args[pos("-r") + 1], "20/1");
    assert!(pos("-r") < pos("-i"));
    assert_eq!(args[pos("-c:v") + 1], "libx264");
    assert_eq!(args.last().unwrap(), "target/x.mp4");
}

#[test]
fn odd_sizes_are_rejected_for_yuv420p() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/odd.mp4"));
    assert!(matches!(sink.begin(cfg(3, 2)), Err(ChartError::Encode(_))));
}

#[test]
fn push_before_begin_fails() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/none.mp4"));
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    assert!(sink.end().is_err());
}

#[test]
fn encodes_a_short_mp4_when_ffmpeg_is_available() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let out = PathBuf::from("target/chartreel_unit/ffmpeg_sink.mp4");
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&out));
    sink.begin(cfg(16, 16)).unwrap();
    for i in 0..3 {
        let frame = FrameRGBA {
            width: 16,
            height: 16,
            data: vec![(i * 60) as u8; 16 * 16 * 4],
            premultiplied: true,
        };
        sink.push_frame(FrameIndex(i), &frame).unwrap();
    }
    sink.end().unwrap();
    assert!(std::fs::metadata(&out).unwrap().len() > 0);
}
