// 認証トークン本体。発行は外部の認証基盤が行い、
// この API ではトークンからユーザーを引くことのみ扱う
pub struct AccessToken(pub String);
