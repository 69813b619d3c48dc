use chrono::NaiveDate;
use gastos_client::parse_date_input;
use shared::domain::ExpenseId;
use thiserror::Error;

/// One line typed at the console prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SetDescription(String),
    SetDate(Option<NaiveDate>),
    SetAmount(String),
    Submit,
    Edit(ExpenseId),
    Cancel,
    Delete(ExpenseId),
    Reload,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntentError {
    #[error("comando desconhecido: {0}")]
    Unknown(String),
    #[error("informe o id do gasto")]
    MissingId,
    #[error("id inválido: {0}")]
    InvalidId(String),
    #[error("data inválida: {0} (use AAAA-MM-DD ou DD/MM/AAAA)")]
    InvalidDate(String),
}

pub const HELP: &str = "\
descricao <texto>   preenche a descrição
data <AAAA-MM-DD>   preenche a data (vazio limpa)
valor <número>      preenche o valor
salvar              adiciona ou atualiza
editar <id>         carrega um gasto no formulário
cancelar            descarta a edição
excluir <id>        exclui um gasto
recarregar          busca a lista e o total
mostrar             redesenha a tela
sair                encerra";

pub fn parse_intent(line: &str) -> Result<Intent, IntentError> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command.to_lowercase().as_str() {
        "descricao" | "descrição" => Ok(Intent::SetDescription(rest.to_string())),
        "data" => {
            if rest.is_empty() {
                return Ok(Intent::SetDate(None));
            }
            parse_date_input(rest)
                .map(|date| Intent::SetDate(Some(date)))
                .ok_or_else(|| IntentError::InvalidDate(rest.to_string()))
        }
        "valor" => Ok(Intent::SetAmount(rest.to_string())),
        "salvar" => Ok(Intent::Submit),
        "editar" => parse_id(rest).map(Intent::Edit),
        "cancelar" => Ok(Intent::Cancel),
        "excluir" => parse_id(rest).map(Intent::Delete),
        "recarregar" => Ok(Intent::Reload),
        "" | "mostrar" => Ok(Intent::Show),
        "ajuda" | "?" => Ok(Intent::Help),
        "sair" => Ok(Intent::Quit),
        other => Err(IntentError::Unknown(other.to_string())),
    }
}

fn parse_id(raw: &str) -> Result<ExpenseId, IntentError> {
    if raw.is_empty() {
        return Err(IntentError::MissingId);
    }
    raw.trim_start_matches('#')
        .parse::<i64>()
        .map(ExpenseId)
        .map_err(|_| IntentError::InvalidId(raw.to_string()))
}

/// Reads a yes/no answer; anything but an explicit yes declines.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "sim" | "y" | "yes"
    )
}
