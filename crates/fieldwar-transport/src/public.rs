//! Read-only game data that doesn't depend on the active mode.

use fieldwar_protocol::{
    ConqueredFieldsResponse, FieldId, GameMap, Score, ScoreboardResponse,
    Token, User, UserListResponse,
};

use crate::{HttpApi, TransportError};

/// Scoreboard, map, and player listings.
///
/// These routes exist once on the server regardless of API style, so
/// they live beside the transports rather than inside them.
#[derive(Debug, Clone)]
pub struct PublicApi {
    http: HttpApi,
}

impl PublicApi {
    pub fn new(http: HttpApi) -> Self {
        Self { http }
    }

    /// `GET /scoreboard`.
    pub async fn scoreboard(&self) -> Result<Vec<Score>, TransportError> {
        let resp: ScoreboardResponse = self.http.get_json("/scoreboard", None).await?;
        Ok(resp.score_list)
    }

    /// `GET /map`.
    pub async fn map(&self) -> Result<GameMap, TransportError> {
        self.http.get_json("/map", None).await
    }

    /// `GET /api/v1/userlist`. Needs a valid token.
    pub async fn user_list(&self, token: &Token) -> Result<Vec<User>, TransportError> {
        let resp: UserListResponse = self
            .http
            .get_json("/api/v1/userlist", Some(token))
            .await?;
        Ok(resp.user_list)
    }

    /// `GET /api/v1/me`: fields this player holds through the REST API.
    pub async fn conquered_fields(&self, token: &Token) -> Result<Vec<FieldId>, TransportError> {
        let resp: ConqueredFieldsResponse =
            self.http.get_json("/api/v1/me", Some(token)).await?;
        Ok(resp.fields)
    }
}
