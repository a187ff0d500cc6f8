// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

/// Signing name of the service, used in the credential scope.
pub const SERVICE: &str = "secretsmanager";

/// Content type of the AWS JSON 1.1 protocol.
pub const CONTENT_TYPE_AMZ_JSON: &str = "application/x-amz-json-1.1";

/// `X-Amz-Target` of `GetSecretValue`.
pub const TARGET_GET_SECRET_VALUE: &str = "secretsmanager.GetSecretValue";

/// Env value overriding the Secrets Manager endpoint.
pub const AWS_ENDPOINT_URL_SECRETS_MANAGER: &str = "AWS_ENDPOINT_URL_SECRETS_MANAGER";
