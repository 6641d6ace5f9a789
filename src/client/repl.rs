//! Terminal read-eval loop for the chat client.

use std::future::Future;
use std::io::Write;
use std::pin::pin;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use super::gemini::ChatModel;
use super::mcp::ToolBackend;
use super::session::ChatSession;

/// Read lines until end of input or Ctrl-C, answering each one.
///
/// Errors from a turn are printed and the loop continues.
pub async fn run<M, B, R, W>(
    session: &mut ChatSession<M, B>,
    input: R,
    output: &mut W,
) -> std::io::Result<()>
where
    M: ChatModel,
    B: ToolBackend,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    run_until(session, input, output, tokio::signal::ctrl_c()).await
}

/// Same as [`run`], stopping when `interrupt` completes instead of on Ctrl-C.
///
/// The interrupt is honoured both while waiting for input and while a turn
/// is in flight; an interrupted turn is dropped.
pub async fn run_until<M, B, R, W, I>(
    session: &mut ChatSession<M, B>,
    mut input: R,
    output: &mut W,
    interrupt: I,
) -> std::io::Result<()>
where
    M: ChatModel,
    B: ToolBackend,
    R: AsyncBufRead + Unpin,
    W: Write,
    I: Future,
{
    let mut interrupt = pin!(interrupt);
    let mut buf = Vec::new();

    loop {
        write!(output, "\nYou:\n")?;
        output.flush()?;

        buf.clear();
        let read = tokio::select! {
            read = input.read_until(b'\n', &mut buf) => Some(read?),
            _ = &mut interrupt => None,
        };
        let Some(prompt) = read.filter(|n| *n > 0).map(|_| decode_line(&buf)) else {
            writeln!(output, "\nExiting chat.")?;
            break;
        };

        writeln!(output, "Generating...")?;
        output.flush()?;
        let reply = tokio::select! {
            reply = session.send_message(&prompt) => Some(reply),
            _ = &mut interrupt => None,
        };
        match reply {
            Some(Ok(reply)) => writeln!(output, "Response: {}", reply)?,
            Some(Err(e)) => writeln!(output, "Error during message generation: {}", e)?,
            None => {
                writeln!(output, "\nExiting chat.")?;
                break;
            }
        }
    }

    writeln!(output, "Chat session ended.")?;
    output.flush()
}

/// Strip the line terminator; invalid UTF-8 is replaced, not rejected.
fn decode_line(buf: &[u8]) -> String {
    let line = buf.strip_suffix(b"\n").unwrap_or(buf);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::error::ClientError;
    use crate::client::gemini::{Content, FunctionDeclaration};
    use async_trait::async_trait;
    use serde_json::Value;

    /// Echoes the last user text, failing on "fail".
    struct EchoModel;

    #[async_trait]
    impl ChatModel for EchoModel {
        async fn generate(
            &self,
            history: &[Content],
            _functions: &[FunctionDeclaration],
        ) -> Result<Content, ClientError> {
            let last = history.last().map(Content::text).unwrap_or_default();
            if last == "fail" {
                return Err(ClientError::invalid_response("no answer"));
            }
            Ok(Content {
                role: "model".to_string(),
                parts: vec![crate::client::gemini::Part::text(format!("echo {}", last))],
            })
        }
    }

    /// Never answers.
    struct StuckModel;

    #[async_trait]
    impl ChatModel for StuckModel {
        async fn generate(
            &self,
            _history: &[Content],
            _functions: &[FunctionDeclaration],
        ) -> Result<Content, ClientError> {
            futures::future::pending().await
        }
    }

    struct NoTools;

    #[async_trait]
    impl ToolBackend for NoTools {
        async fn list_tools(&self) -> Result<Vec<FunctionDeclaration>, ClientError> {
            Ok(Vec::new())
        }

        async fn call_tool(&self, _name: &str, _arguments: Value) -> Result<Value, ClientError> {
            Ok(Value::Null)
        }
    }

    #[tokio::test]
    async fn test_transcript() {
        let mut session = ChatSession::start(EchoModel, NoTools, 2).await.unwrap();
        let input: &[u8] = b"hello\nfail\nbye\n";
        let mut output = Vec::new();

        run(&mut session, input, &mut output).await.unwrap();

        let transcript = String::from_utf8(output).unwrap();
        assert_eq!(
            transcript,
            "\nYou:\nGenerating...\nResponse: echo hello\n\
             \nYou:\nGenerating...\nError during message generation: Invalid response: no answer\n\
             \nYou:\nGenerating...\nResponse: echo bye\n\
             \nYou:\n\nExiting chat.\nChat session ended.\n"
        );
    }

    #[tokio::test]
    async fn test_input_split_across_reads() {
        let mut session = ChatSession::start(EchoModel, NoTools, 2).await.unwrap();
        let mock = tokio_test::io::Builder::new()
            .read(b"inc")
            .read(b"ident\n")
            .build();
        let mut output = Vec::new();

        run(&mut session, tokio::io::BufReader::new(mock), &mut output)
            .await
            .unwrap();

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("Response: echo incident\n"));
        assert!(transcript.ends_with("Chat session ended.\n"));
    }

    #[tokio::test]
    async fn test_interrupt_during_generation_exits() {
        let mut session = ChatSession::start(StuckModel, NoTools, 2).await.unwrap();
        let input: &[u8] = b"hello\nnever read\n";
        let mut output = Vec::new();
        let interrupt = tokio::time::sleep(std::time::Duration::from_millis(50));

        tokio::time::timeout(
            std::time::Duration::from_secs(5),
            run_until(&mut session, input, &mut output, interrupt),
        )
        .await
        .expect("interrupt did not stop the chat")
        .unwrap();

        let transcript = String::from_utf8(output).unwrap();
        assert_eq!(
            transcript,
            "\nYou:\nGenerating...\n\nExiting chat.\nChat session ended.\n"
        );
    }

    #[tokio::test]
    async fn test_interrupt_while_waiting_for_input() {
        let mut session = ChatSession::start(EchoModel, NoTools, 2).await.unwrap();
        let (reader, _writer) = tokio::io::duplex(64);
        let mut output = Vec::new();
        let interrupt = tokio::time::sleep(std::time::Duration::from_millis(50));

        run_until(
            &mut session,
            tokio::io::BufReader::new(reader),
            &mut output,
            interrupt,
        )
        .await
        .unwrap();

        let transcript = String::from_utf8(output).unwrap();
        assert_eq!(transcript, "\nYou:\n\nExiting chat.\nChat session ended.\n");
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_does_not_end_session() {
        let mut session = ChatSession::start(EchoModel, NoTools, 2).await.unwrap();
        let input: &[u8] = b"caf\xe9\r\nhello\n";
        let mut output = Vec::new();

        run(&mut session, input, &mut output).await.unwrap();

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("Response: echo caf\u{fffd}\n"));
        assert!(transcript.contains("Response: echo hello\n"));
        assert!(transcript.ends_with("\nExiting chat.\nChat session ended.\n"));
    }

    #[test]
    fn test_decode_line_terminators() {
        assert_eq!(decode_line(b"abc\n"), "abc");
        assert_eq!(decode_line(b"abc\r\n"), "abc");
        assert_eq!(decode_line(b"abc"), "abc");
    }
}
