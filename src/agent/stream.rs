// src/agent/stream.rs — Line-oriented decoding of streamed agent answers
//
// The agent streams newline-delimited lines, each optionally prefixed with
// `data:` and carrying a JSON object with an `answer` fragment. A literal
// `[DONE]` line ends the stream early.

use futures::{future, Stream, StreamExt, TryStreamExt};

pub const DATA_PREFIX: &str = "data:";
pub const DONE_SENTINEL: &str = "[DONE]";

/// What a single stream line contributes to the answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    Fragment(String),
    /// Blank, malformed, or no string `answer` field.
    Skip,
    Done,
}

/// Decode one line of the stream.
pub fn decode_line(line: &str) -> LineEvent {
    let line = line.trim();
    let payload = line
        .strip_prefix(DATA_PREFIX)
        .map(str::trim_start)
        .unwrap_or(line);

    if payload.is_empty() {
        return LineEvent::Skip;
    }
    if payload == DONE_SENTINEL {
        return LineEvent::Done;
    }

    match serde_json::from_str::<serde_json::Value>(payload) {
        Ok(value) => match value.get("answer").and_then(|a| a.as_str()) {
            Some(answer) => LineEvent::Fragment(answer.to_string()),
            None => LineEvent::Skip,
        },
        Err(_) => LineEvent::Skip,
    }
}

/// Longest line kept from the stream. Agent fragments are small; anything
/// larger is skipped like a malformed line.
pub const MAX_LINE_BYTES: usize = 1024 * 1024;

/// Re-chunk a byte stream into lines of at most [`MAX_LINE_BYTES`].
pub fn split_lines<S, B, E>(chunks: S) -> impl Stream<Item = Result<String, E>>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    split_lines_with_limit(chunks, MAX_LINE_BYTES)
}

/// Re-chunk a byte stream into lines.
///
/// Bytes are buffered until a `\n` arrives, so a multi-byte character split
/// across chunks decodes intact. A trailing line without a newline is emitted
/// at end-of-stream. Lines longer than `max_line` are dropped without being
/// buffered in full. The first error ends the stream.
pub fn split_lines_with_limit<S, B, E>(
    chunks: S,
    max_line: usize,
) -> impl Stream<Item = Result<String, E>>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    async_stream::stream! {
        let mut buffer: Vec<u8> = Vec::new();
        let mut failed = false;
        // Set while discarding the rest of an overlong line.
        let mut overlong = false;
        let mut chunks = std::pin::pin!(chunks);

        while let Some(chunk) = chunks.next().await {
            let bytes = match chunk {
                Ok(b) => b,
                Err(e) => {
                    yield Err(e);
                    failed = true;
                    break;
                }
            };

            buffer.extend_from_slice(bytes.as_ref());

            while let Some(newline_pos) = buffer.iter().position(|b| *b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=newline_pos).collect();
                if overlong || newline_pos > max_line {
                    overlong = false;
                    continue;
                }
                yield Ok(String::from_utf8_lossy(&line[..newline_pos]).into_owned());
            }

            if buffer.len() > max_line {
                if !overlong {
                    tracing::warn!(limit = max_line, "Skipping overlong agent stream line");
                }
                overlong = true;
                buffer.clear();
            }
        }

        if !failed && !overlong && !buffer.is_empty() {
            yield Ok(String::from_utf8_lossy(&buffer).into_owned());
        }
    }
}

/// Fold decoded lines into the full answer, stopping at the sentinel.
pub async fn collect_answer<S, E>(lines: S) -> Result<String, E>
where
    S: Stream<Item = Result<String, E>>,
{
    lines
        .map_ok(|line| decode_line(&line))
        .try_take_while(|event| future::ready(Ok(!matches!(event, LineEvent::Done))))
        .try_fold(String::new(), |mut answer, event| async move {
            if let LineEvent::Fragment(fragment) = event {
                answer.push_str(&fragment);
            }
            Ok::<_, E>(answer)
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use std::convert::Infallible;

    fn ok_lines(lines: &[&str]) -> impl Stream<Item = Result<String, Infallible>> {
        let owned: Vec<Result<String, Infallible>> =
            lines.iter().map(|l| Ok(l.to_string())).collect();
        stream::iter(owned)
    }

    // ─── decode_line ────────────────────────────────────────────

    #[test]
    fn test_decode_prefixed_answer() {
        assert_eq!(
            decode_line(r#"data: {"event": "message", "answer": "您好"}"#),
            LineEvent::Fragment("您好".into())
        );
    }

    #[test]
    fn test_decode_unprefixed_answer() {
        assert_eq!(
            decode_line(r#"{"answer": "ok"}"#),
            LineEvent::Fragment("ok".into())
        );
    }

    #[test]
    fn test_decode_prefix_without_space() {
        assert_eq!(
            decode_line(r#"data:{"answer": "x"}"#),
            LineEvent::Fragment("x".into())
        );
    }

    #[test]
    fn test_decode_sentinel() {
        assert_eq!(decode_line("data: [DONE]"), LineEvent::Done);
        assert_eq!(decode_line("[DONE]"), LineEvent::Done);
    }

    #[test]
    fn test_decode_skips_noise() {
        assert_eq!(decode_line(""), LineEvent::Skip);
        assert_eq!(decode_line("data: "), LineEvent::Skip);
        assert_eq!(decode_line("event: ping"), LineEvent::Skip);
        assert_eq!(decode_line("data: {not json"), LineEvent::Skip);
        assert_eq!(
            decode_line(r#"data: {"event": "message_end"}"#),
            LineEvent::Skip
        );
        assert_eq!(decode_line(r#"data: {"answer": 42}"#), LineEvent::Skip);
        assert_eq!(decode_line(r#"data: ["answer"]"#), LineEvent::Skip);
    }

    #[test]
    fn test_decode_keeps_leading_d_of_answer() {
        // Only the literal prefix is removed, never characters of the payload.
        assert_eq!(
            decode_line(r#"data: {"answer": "data"}"#),
            LineEvent::Fragment("data".into())
        );
    }

    // ─── collect_answer ─────────────────────────────────────────

    #[tokio::test]
    async fn test_collect_in_arrival_order() {
        let lines = ok_lines(&[
            r#"data: {"answer": "您的"}"#,
            "",
            r#"data: {"answer": "总分"}"#,
            "data: garbage",
            r#"data: {"answer": "为"}"#,
        ]);
        assert_eq!(collect_answer(lines).await.unwrap(), "您的总分为");
    }

    #[tokio::test]
    async fn test_collect_stops_at_sentinel() {
        let lines = ok_lines(&[
            r#"data: {"answer": "a"}"#,
            "data: [DONE]",
            r#"data: {"answer": "ignored"}"#,
        ]);
        assert_eq!(collect_answer(lines).await.unwrap(), "a");
    }

    #[tokio::test]
    async fn test_collect_empty_stream() {
        assert_eq!(collect_answer(ok_lines(&[])).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_collect_propagates_read_error() {
        let lines = stream::iter(vec![
            Ok(r#"data: {"answer": "a"}"#.to_string()),
            Err("connection reset"),
        ]);
        assert_eq!(collect_answer(lines).await, Err("connection reset"));
    }

    // ─── split_lines ────────────────────────────────────────────

    #[tokio::test]
    async fn test_split_across_chunks() {
        let text = "data: {\"answer\": \"专业能力\"}\ndata: [DONE]\n";
        let bytes = text.as_bytes();
        // Split in the middle of a multi-byte character.
        let cut = text.find("业").unwrap() + 1;
        let chunks = stream::iter(vec![
            Ok::<_, Infallible>(bytes[..cut].to_vec()),
            Ok(bytes[cut..].to_vec()),
        ]);
        let lines: Vec<String> = split_lines(chunks).try_collect().await.unwrap();
        assert_eq!(
            lines,
            vec![
                "data: {\"answer\": \"专业能力\"}".to_string(),
                "data: [DONE]".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_split_flushes_trailing_line() {
        let chunks = stream::iter(vec![Ok::<_, Infallible>(b"a\nb".to_vec())]);
        let lines: Vec<String> = split_lines(chunks).try_collect().await.unwrap();
        assert_eq!(lines, vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn test_split_stops_on_error() {
        let chunks = stream::iter(vec![Ok(b"a\npartial".to_vec()), Err("reset")]);
        let items: Vec<Result<String, &str>> = split_lines(chunks).collect().await;
        assert_eq!(items, vec![Ok("a".to_string()), Err("reset")]);
    }

    #[tokio::test]
    async fn test_split_skips_overlong_line() {
        let chunks = stream::iter(vec![
            Ok::<_, Infallible>(b"ok\n0123".to_vec()),
            Ok(b"456789".to_vec()),
            Ok(b"abcdef\nnext\n".to_vec()),
        ]);
        let lines: Vec<String> = split_lines_with_limit(chunks, 8)
            .try_collect()
            .await
            .unwrap();
        assert_eq!(lines, vec!["ok".to_string(), "next".to_string()]);
    }

    #[tokio::test]
    async fn test_split_skips_overlong_line_in_one_chunk() {
        let chunks = stream::iter(vec![Ok::<_, Infallible>(
            b"0123456789abc\nshort\n".to_vec(),
        )]);
        let lines: Vec<String> = split_lines_with_limit(chunks, 8)
            .try_collect()
            .await
            .unwrap();
        assert_eq!(lines, vec!["short".to_string()]);
    }

    #[tokio::test]
    async fn test_split_drops_unterminated_overlong_tail() {
        let chunks = stream::iter(vec![
            Ok::<_, Infallible>(b"a\n".to_vec()),
            Ok(vec![b'x'; 64]),
        ]);
        let lines: Vec<String> = split_lines_with_limit(chunks, 8)
            .try_collect()
            .await
            .unwrap();
        assert_eq!(lines, vec!["a".to_string()]);
    }
}
