//! Scripting command builders.
//!
//! Each builder produces the exact wire form of one scripting command. Key
//! and argument sequences are emitted in caller order, after the `numkeys`
//! count the protocol requires.

use bytes::Bytes;

use crate::core::command::Cmd;
use crate::script::FlushMode;

/// Creates an EVAL command: `EVAL script numkeys key [key ...] arg [arg ...]`.
pub fn eval(script: Bytes, keys: &[&str], args: &[Bytes]) -> Cmd {
    with_keys_and_args(Cmd::new("EVAL").arg(script), keys, args)
}

/// Creates an EVALSHA command:
/// `EVALSHA sha1 numkeys key [key ...] arg [arg ...]`.
pub fn evalsha(digest: &str, keys: &[&str], args: &[Bytes]) -> Cmd {
    with_keys_and_args(Cmd::new("EVALSHA").arg(digest.to_string()), keys, args)
}

/// Creates a SCRIPT EXISTS command with one digest per argument.
pub fn script_exists(digests: &[&str]) -> Cmd {
    let mut cmd = Cmd::new("SCRIPT").arg("EXISTS");
    for digest in digests {
        cmd = cmd.arg(digest.to_string());
    }
    cmd
}

/// Creates a SCRIPT FLUSH command, with an optional flush mode.
pub fn script_flush(mode: Option<FlushMode>) -> Cmd {
    let cmd = Cmd::new("SCRIPT").arg("FLUSH");
    match mode {
        Some(mode) => cmd.arg(mode.as_arg()),
        None => cmd,
    }
}

/// Creates a SCRIPT KILL command.
pub fn script_kill() -> Cmd {
    Cmd::new("SCRIPT").arg("KILL")
}

/// Creates a SCRIPT LOAD command.
pub fn script_load(script: Bytes) -> Cmd {
    Cmd::new("SCRIPT").arg("LOAD").arg(script)
}

fn with_keys_and_args(mut cmd: Cmd, keys: &[&str], args: &[Bytes]) -> Cmd {
    cmd = cmd.arg(keys.len().to_string());
    for key in keys {
        cmd = cmd.arg(key.to_string());
    }
    for arg in args {
        cmd = cmd.arg(arg.clone());
    }
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::frame::Frame;

    fn bulk(s: &str) -> Frame {
        Frame::BulkString(Some(Bytes::copy_from_slice(s.as_bytes())))
    }

    #[test]
    fn eval_cmd_keys_only() {
        let cmd = eval(Bytes::from("return 1"), &["k1", "k2"], &[]);
        assert_eq!(
            cmd.into_frame(),
            Frame::Array(vec![
                bulk("EVAL"),
                bulk("return 1"),
                bulk("2"),
                bulk("k1"),
                bulk("k2"),
            ])
        );
    }

    #[test]
    fn eval_cmd_keys_and_args_keep_caller_order() {
        let cmd = eval(
            Bytes::from("return ARGV[1]"),
            &["b", "a"],
            &[Bytes::from("v2"), Bytes::from("v1")],
        );
        assert_eq!(
            cmd.into_frame(),
            Frame::Array(vec![
                bulk("EVAL"),
                bulk("return ARGV[1]"),
                bulk("2"),
                bulk("b"),
                bulk("a"),
                bulk("v2"),
                bulk("v1"),
            ])
        );
    }

    #[test]
    fn eval_cmd_no_keys() {
        let cmd = eval(Bytes::from("return 1"), &[], &[]);
        assert_eq!(
            cmd.into_frame(),
            Frame::Array(vec![bulk("EVAL"), bulk("return 1"), bulk("0")])
        );
    }

    #[test]
    fn evalsha_cmd() {
        let cmd = evalsha("abc123", &["k"], &[Bytes::from("v")]);
        assert_eq!(
            cmd.into_frame(),
            Frame::Array(vec![
                bulk("EVALSHA"),
                bulk("abc123"),
                bulk("1"),
                bulk("k"),
                bulk("v"),
            ])
        );
    }

    #[test]
    fn script_exists_cmd() {
        let cmd = script_exists(&["d1", "d2"]);
        assert_eq!(
            cmd.into_frame(),
            Frame::Array(vec![bulk("SCRIPT"), bulk("EXISTS"), bulk("d1"), bulk("d2")])
        );
    }

    #[test]
    fn script_flush_cmd_default() {
        assert_eq!(
            script_flush(None).into_frame(),
            Frame::Array(vec![bulk("SCRIPT"), bulk("FLUSH")])
        );
    }

    #[test]
    fn script_flush_cmd_with_mode() {
        assert_eq!(
            script_flush(Some(FlushMode::Async)).into_frame(),
            Frame::Array(vec![bulk("SCRIPT"), bulk("FLUSH"), bulk("ASYNC")])
        );
    }

    #[test]
    fn script_kill_cmd() {
        assert_eq!(
            script_kill().into_frame(),
            Frame::Array(vec![bulk("SCRIPT"), bulk("KILL")])
        );
    }

    #[test]
    fn script_load_cmd() {
        assert_eq!(
            script_load(Bytes::from("return 1")).into_frame(),
            Frame::Array(vec![bulk("SCRIPT"), bulk("LOAD"), bulk("return 1")])
        );
    }
}
