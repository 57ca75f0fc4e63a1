//! Hoop Shot entry point
//!
//! On the web this exposes a `HoopShotGame` handle that the page drives each
//! animation frame. Natively it runs a scripted headless session and logs
//! what happens.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use glam::Vec2;
    use serde::Serialize;
    use wasm_bindgen::prelude::*;

    use hoop_shot::sim::{FixedStep, GameEvent, GameSession, TickInput, run_frame};
    use hoop_shot::{Feedback, FeedbackPlanner, Tuning};

    fn to_js_error(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    /// Everything one `frame` call produced
    #[derive(Serialize)]
    struct FrameReport {
        events: Vec<GameEvent>,
        feedback: Feedback,
    }

    /// Game instance holding all state
    #[wasm_bindgen]
    pub struct HoopShotGame {
        session: GameSession,
        clock: FixedStep,
        planner: FeedbackPlanner,
        input: TickInput,
    }

    #[wasm_bindgen]
    impl HoopShotGame {
        #[wasm_bindgen(constructor)]
        pub fn new(seed: f64) -> Self {
            log::info!("Game initialized with seed: {}", seed as u64);
            Self {
                session: GameSession::default(),
                clock: FixedStep::default(),
                planner: FeedbackPlanner::new(seed as u64),
                input: TickInput::default(),
            }
        }

        /// Replace the tuning from JSON. Score and streak carry over; the
        /// current tuning is kept on error.
        #[wasm_bindgen(js_name = loadTuning)]
        pub fn load_tuning(&mut self, json: &str) -> Result<(), JsValue> {
            let tuning = Tuning::from_json(json).map_err(to_js_error)?;
            self.session.set_tuning(tuning).map_err(to_js_error)
        }

        #[wasm_bindgen(js_name = adjustPower)]
        pub fn adjust_power(&mut self, steps: i32) {
            self.input.power_steps += steps;
        }

        #[wasm_bindgen(js_name = adjustAngle)]
        pub fn adjust_angle(&mut self, steps: i32) {
            self.input.angle_steps += steps;
        }

        /// Held movement keys, each axis in -1..=1
        #[wasm_bindgen(js_name = setMovement)]
        pub fn set_movement(&mut self, x: f32, z: f32) {
            self.input.movement = Vec2::new(x, z);
        }

        #[wasm_bindgen(js_name = setAimOffset)]
        pub fn set_aim_offset(&mut self, degrees: f32) {
            self.session.aim.set_aim_offset(degrees);
            self.session.update_auto_aim();
        }

        pub fn shoot(&mut self) {
            self.input.shoot = true;
        }

        #[wasm_bindgen(js_name = resetBall)]
        pub fn reset_ball(&mut self) {
            self.input.reset_ball = true;
        }

        #[wasm_bindgen(js_name = newGame)]
        pub fn new_game(&mut self) {
            self.input.new_game = true;
        }

        /// Advance by a frame delta in seconds; returns a JSON `FrameReport`
        pub fn frame(&mut self, dt: f32) -> Result<String, JsValue> {
            let events = run_frame(&mut self.session, &mut self.clock, &mut self.input, dt);
            let feedback = self.planner.plan_all(&events);
            serde_json::to_string(&FrameReport { events, feedback }).map_err(to_js_error)
        }

        /// HUD state as JSON
        pub fn snapshot(&self) -> Result<String, JsValue> {
            serde_json::to_string(&self.session.snapshot()).map_err(to_js_error)
        }

        /// Preview arc as a JSON array of points, `null` during flight
        #[wasm_bindgen(js_name = trajectoryPreview)]
        pub fn trajectory_preview(&self) -> Result<String, JsValue> {
            serde_json::to_string(&self.session.trajectory_preview()).map_err(to_js_error)
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("Hoop Shot starting...");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Hoop Shot (native) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => load_tuning(&path),
        None => hoop_shot::Tuning::default(),
    };
    demo::run(tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Read a tuning file, falling back to defaults when it is unusable
#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> hoop_shot::Tuning {
    let loaded = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|json| hoop_shot::Tuning::from_json(&json).map_err(|e| e.to_string()));
    match loaded {
        Ok(tuning) => tuning,
        Err(e) => {
            log::warn!("Ignoring tuning file {path}: {e}");
            hoop_shot::Tuning::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;
    use hoop_shot::consts::*;
    use hoop_shot::sim::{CourtGeometry, FixedStep, GameEvent, GameSession, TickInput, run_frame};
    use hoop_shot::{FeedbackPlanner, Tuning};

    /// A scripted shot: walk for a while, set the aim, shoot
    struct Shot {
        walk: Vec2,
        walk_frames: u32,
        power_steps: i32,
        angle_steps: i32,
    }

    const SHOTS: [Shot; 4] = [
        Shot {
            walk: Vec2::new(1.0, 0.0),
            walk_frames: 110,
            power_steps: -9,
            angle_steps: 2,
        },
        Shot {
            walk: Vec2::new(0.0, 0.0),
            walk_frames: 0,
            power_steps: 0,
            angle_steps: 0,
        },
        Shot {
            walk: Vec2::new(1.0, 0.5),
            walk_frames: 40,
            power_steps: 5,
            angle_steps: 1,
        },
        Shot {
            walk: Vec2::new(-1.0, 0.0),
            walk_frames: 60,
            power_steps: 10,
            angle_steps: -1,
        },
    ];

    /// Frame delta of a 120 Hz display
    const FRAME_DT: f32 = 1.0 / 120.0;

    pub fn run(tuning: Tuning) {
        let mut session = GameSession::new(CourtGeometry::standard(), tuning);
        let mut clock = FixedStep::default();
        let mut planner = FeedbackPlanner::new(0x5EED);

        for (i, shot) in SHOTS.iter().enumerate() {
            let mut walk = TickInput {
                movement: shot.walk,
                ..Default::default()
            };
            for _ in 0..shot.walk_frames {
                run_frame(&mut session, &mut clock, &mut walk, FRAME_DT);
            }

            let mut aim = TickInput {
                power_steps: shot.power_steps,
                angle_steps: shot.angle_steps,
                ..Default::default()
            };
            run_frame(&mut session, &mut clock, &mut aim, MAX_FRAME_DT);
            if let Some(preview) = session.trajectory_preview() {
                log::info!("Shot {}: preview has {} points", i + 1, preview.len());
            }

            let mut fire = TickInput {
                shoot: true,
                ..Default::default()
            };
            let mut events = run_frame(&mut session, &mut clock, &mut fire, MAX_FRAME_DT);
            let mut idle = TickInput::default();
            let mut frames = 0;
            while session.ball.in_flight && frames < 10_000 {
                events.extend(run_frame(&mut session, &mut clock, &mut idle, FRAME_DT));
                frames += 1;
            }

            for event in &events {
                report(event);
            }
            for msg in planner.plan_all(&events).messages {
                log::info!("  [#{:06X}] {}", msg.color, msg.text);
            }
        }

        let snap = session.snapshot();
        log::info!(
            "Final: score {} | {}/{} made ({}%) | streak {}",
            snap.score,
            snap.shots_made,
            snap.attempts,
            snap.accuracy,
            snap.streak
        );
    }

    fn report(event: &GameEvent) {
        match event {
            GameEvent::ShotLaunched { origin, velocity, zone } => log::info!(
                "Launched {} from ({:.2}, {:.2}) at {:.1} m/s",
                zone.label(),
                origin.x,
                origin.z,
                velocity.length()
            ),
            GameEvent::RimContact { point, .. } => log::info!("  rim at {point}"),
            GameEvent::ShotMade(made) => log::info!("  made for {}", made.total()),
            GameEvent::ShotMissed { .. } => log::info!("  missed"),
            _ => log::debug!("  {event:?}"),
        }
    }
}
