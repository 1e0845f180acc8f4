//! Scripting methods on [`Client`].

use bytes::Bytes;

use crate::core::command;
use crate::script::{commands, output, FlushMode, OutputType, ScriptValue};
use crate::{Client, Result};

impl Client {
    /// Executes a Lua script server side.
    ///
    /// The script body may be text or raw bytes. `keys` are the key names
    /// the script accesses through `KEYS`; scripts that also take `ARGV`
    /// values go through [`eval_with_args`](Client::eval_with_args).
    ///
    /// The reply is converted according to `output`.
    pub async fn eval(
        &mut self,
        script: impl AsRef<[u8]>,
        output: OutputType,
        keys: &[&str],
    ) -> Result<ScriptValue> {
        self.eval_with_args(script, output, keys, &[]).await
    }

    /// Executes a Lua script server side with keys and argument values.
    pub async fn eval_with_args(
        &mut self,
        script: impl AsRef<[u8]>,
        output: OutputType,
        keys: &[&str],
        args: &[Bytes],
    ) -> Result<ScriptValue> {
        let script = Bytes::copy_from_slice(script.as_ref());
        let frame = self.send(commands::eval(script, keys, args)).await?;
        output::convert(output, frame)
    }

    /// Executes a script cached server side, referenced by its SHA1 digest.
    ///
    /// Fails with [`Error::NoScript`](crate::Error::NoScript) if the digest
    /// is not in the server script cache.
    pub async fn evalsha(
        &mut self,
        digest: &str,
        output: OutputType,
        keys: &[&str],
    ) -> Result<ScriptValue> {
        self.evalsha_with_args(digest, output, keys, &[]).await
    }

    /// Executes a cached script with keys and argument values.
    pub async fn evalsha_with_args(
        &mut self,
        digest: &str,
        output: OutputType,
        keys: &[&str],
        args: &[Bytes],
    ) -> Result<ScriptValue> {
        let frame = self.send(commands::evalsha(digest, keys, args)).await?;
        output::convert(output, frame)
    }

    /// Checks which of the given digests exist in the server script cache.
    ///
    /// Returns one flag per digest, in the order given.
    pub async fn script_exists(&mut self, digests: &[&str]) -> Result<Vec<bool>> {
        let frame = self.send(commands::script_exists(digests)).await?;
        command::frame_to_vec_bool(frame)
    }

    /// Removes all scripts from the server script cache.
    pub async fn script_flush(&mut self) -> Result<()> {
        let frame = self.send(commands::script_flush(None)).await?;
        command::expect_simple(frame)
    }

    /// Removes all scripts from the server script cache with an explicit
    /// flush mode.
    pub async fn script_flush_mode(&mut self, mode: FlushMode) -> Result<()> {
        let frame = self.send(commands::script_flush(Some(mode))).await?;
        command::expect_simple(frame)
    }

    /// Kills the script currently in execution on the server.
    ///
    /// The server refuses with an error if no script is running or if the
    /// running script has already written data.
    pub async fn script_kill(&mut self) -> Result<()> {
        let frame = self.send(commands::script_kill()).await?;
        command::expect_simple(frame)
    }

    /// Loads a script into the server script cache.
    ///
    /// Returns the SHA1 digest of the script as lowercase hex text, which is
    /// also what [`digest`](Client::digest) computes locally.
    pub async fn script_load(&mut self, script: impl AsRef<[u8]>) -> Result<String> {
        let script = Bytes::copy_from_slice(script.as_ref());
        let frame = self.send(commands::script_load(script)).await?;
        command::frame_to_string(frame)
    }

    /// Computes the SHA1 digest of a script body.
    ///
    /// Purely local: unlike the other scripting methods this never performs
    /// a server round trip, so it is synchronous.
    pub fn digest(&self, script: impl AsRef<[u8]>) -> String {
        crate::script::digest(script)
    }
}
