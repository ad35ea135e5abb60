use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::shared::AppError;

/// Line-oriented input for the console - all we care about is the next line
#[async_trait]
pub trait LineSource: Send {
    /// Next line without its terminator (None once input is closed)
    async fn next_line(&mut self) -> Result<Option<String>, AppError>;
}

/// Lines read from any buffered async reader
pub struct ReaderLines<R> {
    lines: Lines<R>,
}

impl<R: AsyncBufRead + Unpin + Send> ReaderLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

impl ReaderLines<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> LineSource for ReaderLines<R> {
    async fn next_line(&mut self) -> Result<Option<String>, AppError> {
        Ok(self.lines.next_line().await?)
    }
}

/// Produces a fresh future that resolves when the user interrupts a running
/// spin or fetch
pub type Interrupt = Box<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// Ctrl-C as the interrupt
pub fn ctrl_c_interrupt() -> Interrupt {
    Box::new(|| {
        async {
            if tokio::signal::ctrl_c().await.is_err() {
                // No signal handler available; never interrupt
                std::future::pending::<()>().await;
            }
        }
        .boxed()
    })
}

/// An interrupt that never fires
pub fn no_interrupt() -> Interrupt {
    Box::new(|| std::future::pending::<()>().boxed())
}
