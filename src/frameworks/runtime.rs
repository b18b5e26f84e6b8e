// Framework bootstrap for the headless client runtime.

use crate::domain::{EventSink, InputIntent, RenderSink, Snapshot};
use crate::frameworks::config::{self, LogFormat};
use crate::interface_adapters::input::forward_inputs;
use crate::interface_adapters::protocol::{ServerMessage, decode_server_message, encode_input};
use crate::interface_adapters::sinks::{TracingEventSink, TracingRenderSink};
use crate::use_cases::{ClientSession, FramePump, FramePumpSettings, SessionSettings};

use std::{io::Result, sync::Arc, time::Duration};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};
use tokio::sync::{Notify, mpsc, watch};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));
    let fmt = tracing_subscriber::fmt().with_env_filter(filter);

    match config::log_format() {
        LogFormat::Json => fmt.json().flatten_event(true).init(),
        LogFormat::Compact => fmt.with_target(false).compact().init(),
    }

    std::panic::set_hook(Box::new(|info| {
        let thread = std::thread::current().name().map(str::to_owned);
        tracing::error!(%info, ?thread, "client panicked");
    }));
}

// Forwards each non-empty line until EOF, a read error or the receiver closes.
fn spawn_line_reader<R>(reader: R, tx: mpsc::Sender<String>, source: &'static str)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) if line.trim().is_empty() => continue,
                Ok(Some(line)) => {
                    if tx.send(line).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!(source, error = %e, "line read failed");
                    break;
                }
            }
        }
        debug!(source, "line reader finished");
    });
}

/// Channels connecting the frame loop to its collaborators.
pub struct RuntimeChannels {
    // Raw text frames pushed by the transport.
    pub transport_rx: mpsc::Receiver<String>,
    // Latest intent from the input collaborator; `None` when it has nothing valid.
    pub input_rx: watch::Receiver<Option<InputIntent>>,
    // Encoded input messages for the transport, at the throttled rate.
    pub outbound_tx: mpsc::Sender<String>,
    // External stop request (e.g. explicit leave).
    pub shutdown: Arc<Notify>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub accepted: u64,
    pub rejected: u64,
    pub malformed: u64,
    pub inputs_sent: u64,
    // Rolling frame rate measured just before the loop stopped.
    pub average_fps: Option<f32>,
}

/// Decodes one transport frame and hands any snapshot to the session.
fn ingest_frame<E: EventSink>(
    session: &mut ClientSession<E>,
    text: &str,
    summary: &mut RunSummary,
) {
    let message = match decode_server_message(text) {
        Ok(message) => message,
        Err(e) => {
            warn!(error = %e, "dropping undecodable frame");
            summary.malformed += 1;
            return;
        }
    };

    match message {
        ServerMessage::Identity { player_id } => {
            info!(player_id, "identity assigned");
            session.assign_identity(player_id);
        }
        ServerMessage::Snapshot(dto) => match Snapshot::try_from(dto) {
            Ok(snapshot) => {
                if session.on_snapshot(snapshot) {
                    summary.accepted += 1;
                } else {
                    summary.rejected += 1;
                }
            }
            Err(e) => {
                warn!(error = %e, "dropping invalid snapshot");
                summary.malformed += 1;
            }
        },
    }
}

/// Drives the session from a fixed-cadence interval on the current task.
///
/// Transport frames are ingested as soon as they arrive and are seen by the
/// next frame. The loop ends when the transport closes, shutdown is
/// notified, or the outbound side goes away mid-frame.
pub async fn run<E, R>(
    session: &mut ClientSession<E>,
    renderer: &mut R,
    channels: RuntimeChannels,
    frame_interval: Duration,
    pump_settings: FramePumpSettings,
) -> RunSummary
where
    E: EventSink,
    R: RenderSink,
{
    let RuntimeChannels {
        mut transport_rx,
        input_rx,
        outbound_tx,
        shutdown,
    } = channels;

    let mut summary = RunSummary::default();
    let mut pump = FramePump::new(pump_settings);
    pump.start();

    let mut interval = tokio::time::interval(frame_interval);
    // A stalled frame is followed by one clamped frame, not a catch-up burst.
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = shutdown.notified() => {
                info!("shutdown requested");
                pump.stop();
                break;
            }
            frame = transport_rx.recv() => {
                match frame {
                    Some(text) => ingest_frame(session, &text, &mut summary),
                    None => {
                        info!("transport closed");
                        pump.stop();
                        session.leave();
                        break;
                    }
                }
            }
            _ = interval.tick() => {
                // The tick's deadline is when it was due, not when it ran.
                let now = Instant::now().into_std();
                let latest = *input_rx.borrow();
                let mut input_sent = false;

                pump.run_frame(now, |frame| {
                    summary.frames += 1;

                    if frame.input_due {
                        if let Some(input) = &latest {
                            match encode_input(input) {
                                Ok(text) => match outbound_tx.try_send(text) {
                                    Ok(()) => input_sent = true,
                                    Err(mpsc::error::TrySendError::Full(_)) => {
                                        debug!("outbound input channel full; sample dropped");
                                    }
                                    Err(mpsc::error::TrySendError::Closed(_)) => {
                                        info!("outbound channel closed");
                                        frame.stop();
                                    }
                                },
                                Err(e) => warn!(error = %e, "failed to encode input"),
                            }
                        }
                    }

                    session.tick(frame.dt, latest.as_ref());
                    session.render(renderer);
                });

                if input_sent {
                    pump.mark_input_sent(now);
                    summary.inputs_sent += 1;
                }
                // Stopping clears the pump's history; keep the last reading.
                if let Some(fps) = pump.average_fps() {
                    summary.average_fps = Some(fps);
                }
                if !pump.is_running() {
                    session.leave();
                    break;
                }
            }
        }
    }

    if let Some(fps) = summary.average_fps {
        debug!(fps, "average frame rate at stop");
    }
    summary
}

/// Headless client: transport frames are newline-delimited JSON on stdin and
/// outbound input messages are written to stdout.
pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let mut tuning = crate::domain::Tuning::default();
    if let Some(path) = config::tuning_path() {
        match config::load_tuning(&path) {
            Ok(loaded) => {
                info!(path = %path.display(), "tuning loaded");
                tuning = loaded;
            }
            Err(e) => warn!(path = %path.display(), error = %e, "using default tuning"),
        }
    }

    let local_id = config::local_player_id();
    let frame_interval = config::frame_interval();
    debug!(
        local_id,
        frame_interval_ms = frame_interval.as_millis(),
        "client configured"
    );

    let mut session = ClientSession::new(
        SessionSettings {
            local_id,
            interpolation_delay: config::INTERPOLATION_DELAY.as_secs_f32(),
            tuning,
        },
        TracingEventSink::default(),
    );
    let mut renderer = TracingRenderSink::new(config::RENDER_PEER_SLOTS);

    let (transport_tx, transport_rx) = mpsc::channel::<String>(config::TRANSPORT_CHANNEL_CAPACITY);
    let (outbound_tx, mut outbound_rx) = mpsc::channel::<String>(config::OUTBOUND_CHANNEL_CAPACITY);
    let (input_tx, input_rx) = watch::channel(Some(InputIntent::default()));

    // Transport stand-in: one frame per stdin line.
    spawn_line_reader(tokio::io::stdin(), transport_tx, "transport");

    match config::input_source_path() {
        Some(path) => match tokio::fs::File::open(&path).await {
            Ok(file) => {
                let (raw_tx, raw_rx) = mpsc::channel::<String>(config::INPUT_CHANNEL_CAPACITY);
                spawn_line_reader(file, raw_tx, "input");
                tokio::spawn(forward_inputs(raw_rx, input_tx));
                info!(path = %path.display(), "input source attached");
            }
            Err(e) => warn!(path = %path.display(), error = %e, "input source unavailable; idling"),
        },
        // No input device attached: the client idles on the default intent.
        None => debug!("no input source configured"),
    }

    tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(text) = outbound_rx.recv().await {
            if stdout.write_all(format!("{text}\n").as_bytes()).await.is_err() {
                break;
            }
        }
    });

    let summary = run(
        &mut session,
        &mut renderer,
        RuntimeChannels {
            transport_rx,
            input_rx,
            outbound_tx,
            shutdown: Arc::new(Notify::new()),
        },
        frame_interval,
        FramePumpSettings {
            max_dt: config::MAX_FRAME_DT,
            input_period: config::INPUT_SAMPLE_PERIOD,
            fps_window: config::FPS_WINDOW,
        },
    )
    .await;

    info!(
        frames = summary.frames,
        accepted = summary.accepted,
        rejected = summary.rejected,
        malformed = summary.malformed,
        events = session.events().dispatched,
        "client stopped"
    );
    Ok(())
}
