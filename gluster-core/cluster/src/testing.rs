//! 单元测试共用的命令执行模拟

use async_trait::async_trait;
use gluster_executor::CommandRunner;
use mockall::mock;

mock! {
    pub Runner {}

    #[async_trait]
    impl CommandRunner for Runner {
        async fn run(
            &self,
            command: &str,
            args: &[String],
            as_root: bool,
            script_mode: bool,
        ) -> gluster_executor::Result<String>;
    }
}

/// `<cliOutput>` 成功头部
pub const OK_HEADER: &str = "<cliOutput><opRet>0</opRet><opErrno>0</opErrno><opErrstr/>";

/// 期望一次 gluster 调用：参数逐字节一致，总是以 root 执行
pub fn expect_gluster(runner: &mut MockRunner, args: &[&str], script_mode: bool, output: String) {
    let expected: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    runner
        .expect_run()
        .withf(move |command, actual, as_root, script| {
            command == "gluster" && actual == expected.as_slice() && *as_root && *script == script_mode
        })
        .times(1)
        .returning(move |_, _, _, _| Ok(output.clone()));
}
