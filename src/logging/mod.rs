use std::{fmt, thread};

use chrono::{format::DelayedFormat, DateTime, Local};
use concat_string::concat_string;
use once_cell::sync::Lazy;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

use crate::logging::rotate::Rotate;

pub mod rotate;

static LOGGER: Lazy<Logger> = Lazy::new(|| Logger::new("default"));

/// 一次寫入檔案前最多累積的位元組數
const FLUSH_THRESHOLD: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Debug => "Debug",
            Level::Info => "Info",
            Level::Warn => "Warn",
            Level::Error => "Error",
        };
        f.write_str(name)
    }
}

/// 非同步檔案日誌
///
/// 呼叫端只把訊息丟進 channel，實際寫檔由背景線程透過 [`Rotate`] 處理，
/// 每個 `Logger` 對應 `log/` 底下一組以日期命名的檔案。
pub struct Logger {
    writer: UnboundedSender<LogMessage>,
}

impl Logger {
    pub fn new(log_name: &str) -> Self {
        let (tx, mut rx) = unbounded_channel::<LogMessage>();
        let fn_pattern = format!("log/%Y-%m-%d-{}.log", log_name);

        // 寫入檔案的操作使用另一個線程處理
        thread::spawn(move || {
            let mut rotate = Rotate::new(fn_pattern);
            let mut together = String::with_capacity(FLUSH_THRESHOLD);

            while let Some(received) = rx.blocking_recv() {
                together.push_str(&received.to_line());

                if rx.is_empty() || together.len() >= FLUSH_THRESHOLD {
                    if let Err(why) = rotate.write_msg(Local::now(), together.as_bytes()) {
                        error_console(format!(
                            "Failed to write log file because {:?}\r\n{}",
                            why, together
                        ));
                    }
                    rotate.flush();
                    together.clear();
                }
            }
        });

        Logger { writer: tx }
    }

    pub fn debug(&self, log: String) {
        self.send(Level::Debug, log);
    }

    pub fn info(&self, log: String) {
        self.send(Level::Info, log);
    }

    pub fn warn(&self, log: String) {
        self.send(Level::Warn, log);
    }

    pub fn error(&self, log: String) {
        self.send(Level::Error, log);
    }

    fn send(&self, level: Level, msg: String) {
        if let Err(why) = self.writer.send(LogMessage::new(level, msg)) {
            error_console(why.to_string());
        }
    }
}

pub struct LogMessage {
    pub level: Level,
    pub msg: String,
    pub created_at: DateTime<Local>,
}

impl LogMessage {
    pub fn new(level: Level, msg: String) -> Self {
        LogMessage {
            level,
            msg,
            created_at: Local::now(),
        }
    }

    fn to_line(&self) -> String {
        concat_string!(
            self.created_at.format("%F %X%.6f").to_string(),
            " ",
            self.level.to_string(),
            " ",
            self.msg,
            "\r\n"
        )
    }
}

pub fn debug_file_async(log: String) {
    LOGGER.debug(log);
}

pub fn info_file_async(log: String) {
    LOGGER.info(log);
}

pub fn warn_file_async(log: String) {
    LOGGER.warn(log);
}

pub fn error_file_async(log: String) {
    LOGGER.error(log);
}

pub fn info_console(log: String) {
    println!(
        "{} Info {}",
        Local::now().format("%Y-%m-%d %H:%M:%S.%3f"),
        log
    );
}

pub fn error_console(log: String) {
    println!(
        "{} Error {}",
        DelayedFormat::to_string(&Local::now().format("%Y-%m-%d %H:%M:%S.%3f")),
        log
    );
}
