/// Подставить `~` и переменные окружения (`$VAR`, `${VAR}`) в строку команды.
///
/// Тильда раскрывается в начале каждого слова, разделённого пробелом, поэтому
/// `alacritty --working-directory ~/src` тоже работает. Неизвестные переменные
/// остаются как есть.
pub fn expand_command(cmd: &str) -> String {
    cmd.split(' ')
        .map(expand_token)
        .collect::<Vec<_>>()
        .join(" ")
}

fn expand_token(token: &str) -> String {
    shellexpand::full_with_context_no_errors(token, home_dir, |var| std::env::var(var).ok())
        .into_owned()
}

/// Домашний каталог строкой; не-UTF-8 путь оставляет `~` нераскрытой
fn home_dir() -> Option<String> {
    dirs::home_dir().and_then(|p| p.to_str().map(str::to_string))
}
